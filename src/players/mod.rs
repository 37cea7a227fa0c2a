//! A service for managing players.

use std::fmt;

use sqlx::{MySql, Pool, QueryBuilder};

use crate::sqlx::{QueryBuilderExt, UpdateQuery};

pub(crate) mod http;
mod queries;

mod error;
pub use error::{Error, Result};

pub(crate) mod models;
pub use models::{
	CreatedPlayer,
	FetchPlayersRequest,
	FetchPlayersResponse,
	NewPlayer,
	Player,
	PlayerID,
	PlayerUpdate,
	SortPlayersBy,
};

/// A service for managing players.
#[derive(Clone)]
pub struct PlayerService {
	/// Connection pool to the database holding the `Players` table.
	database: Pool<MySql>,
}

impl fmt::Debug for PlayerService {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PlayerService").finish_non_exhaustive()
	}
}

impl PlayerService {
	/// Create a new [`PlayerService`].
	#[tracing::instrument(skip_all)]
	pub fn new(database: Pool<MySql>) -> Self {
		Self { database }
	}

	/// Fetches a single player.
	///
	/// This will return `Ok(None)` if the player was not found, but everything
	/// else went fine.
	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	pub async fn fetch_player(&self, player_id: PlayerID) -> Result<Option<Player>> {
		let player = sqlx::query_as::<_, Player>(&format!("{} WHERE id = ?", queries::SELECT))
			.bind(player_id)
			.fetch_optional(&self.database)
			.await?;

		Ok(player)
	}

	/// Fetches a page of players, along with the total amount of players.
	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	pub async fn fetch_players(&self, req: FetchPlayersRequest) -> Result<FetchPlayersResponse> {
		let mut txn = self.database.begin().await?;
		let mut query = QueryBuilder::<MySql>::new(queries::SELECT);

		query
			.order_by(req.order, req.sort_by.column())
			.push_limits(req.limit, req.offset);

		let players = query
			.build_query_as::<Player>()
			.fetch_all(txn.as_mut())
			.await?;

		let total = sqlx::query_scalar::<_, u64>("SELECT CAST(COUNT(*) AS UNSIGNED) FROM Players")
			.fetch_one(txn.as_mut())
			.await?;

		txn.commit().await?;

		Ok(FetchPlayersResponse { players, total })
	}

	/// Creates a new player.
	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	pub async fn create_player(&self, player: NewPlayer) -> Result<CreatedPlayer> {
		let player_id = sqlx::query(
			r"
			INSERT INTO
			  Players (
			    first_name,
			    last_name,
			    position,
			    height,
			    weight,
			    jersey_number,
			    college,
			    country
			  )
			VALUES
			  (?, ?, ?, ?, ?, ?, ?, ?)
			",
		)
		.bind(player.first_name)
		.bind(player.last_name)
		.bind(player.position)
		.bind(player.height)
		.bind(player.weight)
		.bind(player.jersey_number)
		.bind(player.college)
		.bind(player.country)
		.execute(&self.database)
		.await?
		.last_insert_id();

		tracing::info!(target: "ball_dont_lie_api::audit_log", player_id, "created player");

		Ok(CreatedPlayer { player_id })
	}

	/// Replaces every field of an existing player.
	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	pub async fn replace_player(&self, player_id: PlayerID, player: NewPlayer) -> Result<()> {
		let mut txn = self.database.begin().await?;

		lock_player(&mut txn, player_id).await?;

		sqlx::query(
			r"
			UPDATE
			  Players
			SET
			  first_name = ?,
			  last_name = ?,
			  position = ?,
			  height = ?,
			  weight = ?,
			  jersey_number = ?,
			  college = ?,
			  country = ?
			WHERE
			  id = ?
			",
		)
		.bind(player.first_name)
		.bind(player.last_name)
		.bind(player.position)
		.bind(player.height)
		.bind(player.weight)
		.bind(player.jersey_number)
		.bind(player.college)
		.bind(player.country)
		.bind(player_id)
		.execute(txn.as_mut())
		.await?;

		txn.commit().await?;

		tracing::info!(target: "ball_dont_lie_api::audit_log", player_id, "replaced player");

		Ok(())
	}

	/// Updates the given fields of an existing player.
	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	pub async fn update_player(&self, player_id: PlayerID, update: PlayerUpdate) -> Result<()> {
		if update.is_empty() {
			return Err(Error::EmptyUpdate);
		}

		let PlayerUpdate {
			first_name,
			last_name,
			position,
			height,
			weight,
			jersey_number,
			college,
			country,
		} = update;

		let mut txn = self.database.begin().await?;

		lock_player(&mut txn, player_id).await?;

		let mut query = UpdateQuery::new("Players");

		query
			.set_if_some("first_name", first_name)
			.set_if_some("last_name", last_name)
			.set_if_some("position", position)
			.set_if_some("height", height)
			.set_if_some("weight", weight)
			.set_if_some("jersey_number", jersey_number)
			.set_if_some("college", college)
			.set_if_some("country", country);

		query.push(" WHERE id = ").push_bind(player_id);
		query.build().execute(txn.as_mut()).await?;

		txn.commit().await?;

		tracing::info!(target: "ball_dont_lie_api::audit_log", player_id, "updated player");

		Ok(())
	}

	/// Deletes a player.
	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	pub async fn delete_player(&self, player_id: PlayerID) -> Result<()> {
		let result = sqlx::query("DELETE FROM Players WHERE id = ?")
			.bind(player_id)
			.execute(&self.database)
			.await?;

		if result.rows_affected() == 0 {
			return Err(Error::PlayerDoesNotExist);
		}

		tracing::info!(target: "ball_dont_lie_api::audit_log", player_id, "deleted player");

		Ok(())
	}
}

/// Locks the row of the given player for the rest of the transaction.
///
/// MySQL reports 0 affected rows for an `UPDATE` that doesn't change
/// anything, so existence has to be checked up front.
async fn lock_player(txn: &mut sqlx::Transaction<'_, MySql>, player_id: PlayerID) -> Result<()> {
	sqlx::query_scalar::<_, PlayerID>("SELECT id FROM Players WHERE id = ? FOR UPDATE")
		.bind(player_id)
		.fetch_optional(txn.as_mut())
		.await?
		.ok_or(Error::PlayerDoesNotExist)?;

	Ok(())
}
