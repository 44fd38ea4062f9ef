//! Handler for `POST /cadastrar`.
//!
//! Body: `{"nome": "...", "cpf": "...", "email": "...", "numeroAposta": 42}`.
//! `numeroAposta` may also be a numeric string, which is what the HTML form
//! posts.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use wbo7_core::{
  bet::{BetNumber, NewBet},
  store::BetStore,
  winner::WinnerLog,
};

use crate::{ApiState, error::ApiError};

pub const REGISTERED_MESSAGE: &str = "Cadastro realizado com sucesso!";

// ─── Body ─────────────────────────────────────────────────────────────────────

/// A bet number as sent by clients: either a JSON number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
  Number(i64),
  Text(String),
}

/// JSON body accepted by `POST /cadastrar`. Every field is required; they are
/// optional here so missing fields produce a readable 400.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
  pub nome:          Option<String>,
  pub cpf:           Option<String>,
  pub email:         Option<String>,
  pub numero_aposta: Option<NumberOrText>,
}

fn required(field: &str, value: Option<String>) -> Result<String, ApiError> {
  match value.map(|v| v.trim().to_owned()) {
    Some(v) if !v.is_empty() => Ok(v),
    _ => Err(ApiError::BadRequest(format!("campo obrigatório ausente: {field}"))),
  }
}

impl TryFrom<RegisterBody> for NewBet {
  type Error = ApiError;

  fn try_from(body: RegisterBody) -> Result<Self, ApiError> {
    let full_name = required("nome", body.nome)?;
    let national_id = required("cpf", body.cpf)?;
    let email = required("email", body.email)?;

    let raw = match body.numero_aposta {
      Some(NumberOrText::Number(n)) => n,
      Some(NumberOrText::Text(s)) => s.trim().parse::<i64>().map_err(|_| {
        ApiError::BadRequest(format!("numeroAposta não é um número: {s:?}"))
      })?,
      None => {
        return Err(ApiError::BadRequest("campo obrigatório ausente: numeroAposta".into()));
      }
    };
    let bet_number = BetNumber::new(raw)
      .map_err(|_| ApiError::BadRequest(format!("numeroAposta fora de 0-99: {raw}")))?;

    Ok(NewBet { full_name, national_id, email, bet_number })
  }
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
  pub message: &'static str,
}

// ─── Handler ──────────────────────────────────────────────────────────────────

/// `POST /cadastrar` — 200 `{"message": ...}` on success.
pub async fn handler<S, L>(
  State(state): State<ApiState<S, L>>,
  body: Result<Json<RegisterBody>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError>
where
  S: BetStore + 'static,
  L: WinnerLog + 'static,
{
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let bet = NewBet::try_from(body)?;
  let national_id = bet.national_id.clone();

  let stored = state
    .store
    .insert_bet(bet)
    .await
    .map_err(|e| ApiError::from_store(e, &national_id))?;

  tracing::info!(id = stored.id, bet_number = %stored.bet_number, "bet registered");
  Ok(Json(MessageBody { message: REGISTERED_MESSAGE }))
}
