//! Request / Response types for this service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::openapi::parameters::{Limit, Offset, SortingOrder};

/// A player's unique ID, generated by the database.
pub type PlayerID = u64;

/// A basketball player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[schema(example = json!({
  "id": 1,
  "first_name": "LeBron",
  "last_name": "James",
  "position": "F",
  "height": "6-9",
  "weight": "250",
  "jersey_number": "23",
  "college": null,
  "country": "USA"
}))]
pub struct Player {
	/// The player's ID.
	pub id: PlayerID,

	/// The player's first name.
	pub first_name: Option<String>,

	/// The player's last name.
	pub last_name: Option<String>,

	/// e.g. `G`, `F`, `C`, `G-F`.
	pub position: Option<String>,

	/// Feet and inches, e.g. `6-9`.
	pub height: Option<String>,

	/// Pounds.
	pub weight: Option<String>,

	/// The number on the player's jersey.
	pub jersey_number: Option<String>,

	/// The college the player went to, if any.
	pub college: Option<String>,

	/// The player's home country.
	pub country: Option<String>,
}

/// Request payload for creating a player, or replacing an existing one.
///
/// Fields that are left out are stored as `null`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewPlayer {
	/// The player's first name.
	pub first_name: Option<String>,

	/// The player's last name.
	pub last_name: Option<String>,

	/// The player's position.
	pub position: Option<String>,

	/// The player's height.
	pub height: Option<String>,

	/// The player's weight.
	pub weight: Option<String>,

	/// The number on the player's jersey.
	pub jersey_number: Option<String>,

	/// The college the player went to.
	pub college: Option<String>,

	/// The player's home country.
	pub country: Option<String>,
}

/// Request payload for partially updating a player.
///
/// Only fields that are present are changed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PlayerUpdate {
	/// The player's first name.
	pub first_name: Option<String>,

	/// The player's last name.
	pub last_name: Option<String>,

	/// The player's position.
	pub position: Option<String>,

	/// The player's height.
	pub height: Option<String>,

	/// The player's weight.
	pub weight: Option<String>,

	/// The number on the player's jersey.
	pub jersey_number: Option<String>,

	/// The college the player went to.
	pub college: Option<String>,

	/// The player's home country.
	pub country: Option<String>,
}

impl PlayerUpdate {
	/// Whether this update would not change anything.
	pub fn is_empty(&self) -> bool {
		let Self {
			first_name,
			last_name,
			position,
			height,
			weight,
			jersey_number,
			college,
			country,
		} = self;

		[first_name, last_name, position, height, weight, jersey_number, college, country]
			.iter()
			.all(|field| field.is_none())
	}
}

/// Response payload for creating a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedPlayer {
	/// The ID the new player was assigned.
	pub player_id: PlayerID,
}

impl IntoResponse for CreatedPlayer {
	fn into_response(self) -> Response {
		(StatusCode::CREATED, Json(self)).into_response()
	}
}

/// Columns the player list can be sorted by.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortPlayersBy {
	/// Sort by ID, i.e. insertion order.
	#[default]
	Id,

	/// Sort by first name.
	FirstName,

	/// Sort by last name.
	LastName,

	/// Sort by position.
	Position,

	/// Sort by jersey number.
	///
	/// Jersey numbers are strings, so `"10"` sorts before `"9"`.
	JerseyNumber,

	/// Sort by country.
	Country,
}

impl SortPlayersBy {
	/// The SQL column to sort by.
	pub const fn column(&self) -> &'static str {
		match self {
			Self::Id => "id",
			Self::FirstName => "first_name",
			Self::LastName => "last_name",
			Self::Position => "position",
			Self::JerseyNumber => "jersey_number",
			Self::Country => "country",
		}
	}
}

/// Request payload for fetching many players.
#[derive(Debug, Default, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FetchPlayersRequest {
	/// Maximum number of results to return.
	#[serde(default)]
	#[param(value_type = Option<u64>, maximum = 1000)]
	pub limit: Limit,

	/// Pagination offset.
	#[serde(default)]
	#[param(value_type = Option<u64>)]
	pub offset: Offset,

	/// Which column to sort by.
	#[serde(default)]
	#[param(value_type = Option<SortPlayersBy>)]
	pub sort_by: SortPlayersBy,

	/// Which direction to sort in.
	#[serde(default)]
	#[param(value_type = Option<SortingOrder>)]
	pub order: SortingOrder,
}

/// Response payload for fetching many players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FetchPlayersResponse {
	/// The players on this page.
	pub players: Vec<Player>,

	/// How many players there are in total.
	pub total: u64,
}

impl IntoResponse for FetchPlayersResponse {
	fn into_response(self) -> Response {
		Json(self).into_response()
	}
}
