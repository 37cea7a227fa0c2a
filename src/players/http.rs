//! HTTP handlers for this service.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{routing, Json, Router};
use axum_extra::extract::Query;

use super::{
	CreatedPlayer,
	Error,
	FetchPlayersRequest,
	FetchPlayersResponse,
	NewPlayer,
	Player,
	PlayerID,
	PlayerService,
	PlayerUpdate,
};
use crate::auth::{Grant, Jwt};

impl From<PlayerService> for Router {
	fn from(svc: PlayerService) -> Self {
		Router::new()
			.route("/", routing::get(get_many).post(create_player))
			.route(
				"/:player_id",
				routing::get(get_single)
					.put(replace_player)
					.patch(update_player)
					.delete(delete_player),
			)
			.with_state(svc)
	}
}

/// Fetch players.
#[tracing::instrument(skip_all, fields(role = %jwt.role), err(Debug, level = "debug"))]
#[utoipa::path(
  get,
  path = "/players",
  tag = "Players",
  params(FetchPlayersRequest),
  security(("Bearer" = [])),
  responses(
    (status = 200, body = FetchPlayersResponse),
    (status = 204, description = "no players on this page"),
    (status = 400, description = "invalid query parameters"),
    (status = 401, description = "missing, invalid or expired token"),
    (status = 403, description = "token lacks the `READ` permission"),
  ),
)]
pub(crate) async fn get_many(
	jwt: Jwt<Grant>,
	State(svc): State<PlayerService>,
	Query(req): Query<FetchPlayersRequest>,
) -> Result<FetchPlayersResponse, Error> {
	let res = svc.fetch_players(req).await?;

	if res.players.is_empty() {
		return Err(Error::NoData);
	}

	Ok(res)
}

/// Create a player.
#[tracing::instrument(skip_all, fields(role = %jwt.role), err(Debug, level = "debug"))]
#[utoipa::path(
  post,
  path = "/players",
  tag = "Players",
  request_body = NewPlayer,
  security(("Bearer" = [])),
  responses(
    (status = 201, body = CreatedPlayer),
    (status = 401, description = "missing, invalid or expired token"),
    (status = 403, description = "token lacks the `CREATE` permission"),
  ),
)]
pub(crate) async fn create_player(
	jwt: Jwt<Grant>,
	State(svc): State<PlayerService>,
	Json(player): Json<NewPlayer>,
) -> Result<CreatedPlayer, Error> {
	svc.create_player(player).await
}

/// Fetch a single player.
#[tracing::instrument(skip_all, fields(role = %jwt.role, %player_id), err(Debug, level = "debug"))]
#[utoipa::path(
  get,
  path = "/players/{player_id}",
  tag = "Players",
  params(("player_id" = u64, Path, description = "a player's ID")),
  security(("Bearer" = [])),
  responses(
    (status = 200, body = Player),
    (status = 401, description = "missing, invalid or expired token"),
    (status = 403, description = "token lacks the `READ` permission"),
    (status = 404, description = "the player does not exist"),
  ),
)]
pub(crate) async fn get_single(
	jwt: Jwt<Grant>,
	State(svc): State<PlayerService>,
	Path(player_id): Path<PlayerID>,
) -> Result<Json<Player>, Error> {
	let player = svc
		.fetch_player(player_id)
		.await?
		.ok_or(Error::PlayerDoesNotExist)?;

	Ok(Json(player))
}

/// Replace every field of a player.
#[tracing::instrument(skip_all, fields(role = %jwt.role, %player_id), err(Debug, level = "debug"))]
#[utoipa::path(
  put,
  path = "/players/{player_id}",
  tag = "Players",
  params(("player_id" = u64, Path, description = "a player's ID")),
  request_body = NewPlayer,
  security(("Bearer" = [])),
  responses(
    (status = 204, description = "the player was replaced"),
    (status = 401, description = "missing, invalid or expired token"),
    (status = 403, description = "token lacks the `UPDATE` permission"),
    (status = 404, description = "the player does not exist"),
  ),
)]
pub(crate) async fn replace_player(
	jwt: Jwt<Grant>,
	State(svc): State<PlayerService>,
	Path(player_id): Path<PlayerID>,
	Json(player): Json<NewPlayer>,
) -> Result<StatusCode, Error> {
	svc.replace_player(player_id, player).await?;

	Ok(StatusCode::NO_CONTENT)
}

/// Update some fields of a player.
#[tracing::instrument(skip_all, fields(role = %jwt.role, %player_id), err(Debug, level = "debug"))]
#[utoipa::path(
  patch,
  path = "/players/{player_id}",
  tag = "Players",
  params(("player_id" = u64, Path, description = "a player's ID")),
  request_body = PlayerUpdate,
  security(("Bearer" = [])),
  responses(
    (status = 204, description = "the player was updated"),
    (status = 400, description = "the update was empty"),
    (status = 401, description = "missing, invalid or expired token"),
    (status = 403, description = "token lacks the `UPDATE` permission"),
    (status = 404, description = "the player does not exist"),
  ),
)]
pub(crate) async fn update_player(
	jwt: Jwt<Grant>,
	State(svc): State<PlayerService>,
	Path(player_id): Path<PlayerID>,
	Json(update): Json<PlayerUpdate>,
) -> Result<StatusCode, Error> {
	svc.update_player(player_id, update).await?;

	Ok(StatusCode::NO_CONTENT)
}

/// Delete a player.
#[tracing::instrument(skip_all, fields(role = %jwt.role, %player_id), err(Debug, level = "debug"))]
#[utoipa::path(
  delete,
  path = "/players/{player_id}",
  tag = "Players",
  params(("player_id" = u64, Path, description = "a player's ID")),
  security(("Bearer" = [])),
  responses(
    (status = 204, description = "the player was deleted"),
    (status = 401, description = "missing, invalid or expired token"),
    (status = 403, description = "token lacks the `DELETE` permission"),
    (status = 404, description = "the player does not exist"),
  ),
)]
pub(crate) async fn delete_player(
	jwt: Jwt<Grant>,
	State(svc): State<PlayerService>,
	Path(player_id): Path<PlayerID>,
) -> Result<StatusCode, Error> {
	svc.delete_player(player_id).await?;

	Ok(StatusCode::NO_CONTENT)
}
