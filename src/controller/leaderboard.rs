use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use crate::model::leaderboard::LeaderboardOrder;
use crate::storage::ScoreStore;
use crate::view::index::{DEFAULT_INDEX_TITLE, render_index_template};
use crate::view::leaderboard::render_leaderboard;

pub const REFRESH_SECONDS: u32 = 5;

/// Shared state for the leaderboard routes.
#[derive(Clone)]
pub struct LeaderboardState {
    pub store: Arc<dyn ScoreStore>,
    pub order: LeaderboardOrder,
}

pub async fn index() -> impl Responder {
    let markup = render_index_template(DEFAULT_INDEX_TITLE, REFRESH_SECONDS);
    HttpResponse::Ok()
        .content_type("text/html")
        .body(markup.into_string())
}

/// `GET /leaderboard`. `json=1` returns the documents, otherwise an html
/// fragment. `order=ascending|descending` overrides the configured order.
pub async fn leaderboard(
    query: web::Query<HashMap<String, String>>,
    state: Data<LeaderboardState>,
) -> impl Responder {
    fn get_param_str<'a>(query: &'a HashMap<String, String>, key: &str) -> &'a str {
        query.get(key).map_or("", |s| s.as_str())
    }

    let json = match get_param_str(&query, "json") {
        "1" => true,
        "0" | "" => false,
        other => other.parse().unwrap_or(false),
    };

    let order = match get_param_str(&query, "order") {
        "" => state.order,
        "ascending" | "asc" => LeaderboardOrder::Ascending,
        "descending" | "desc" => LeaderboardOrder::Descending,
        other => {
            return HttpResponse::BadRequest()
                .json(json!({"error": format!("unknown order '{other}'")}));
        }
    };

    match state.store.list(Some(order)).await {
        Ok(entries) => {
            if json {
                HttpResponse::Ok().json(entries)
            } else {
                HttpResponse::Ok()
                    .content_type("text/html")
                    .body(render_leaderboard(&entries, order).into_string())
            }
        }
        Err(e) => {
            warn!(error = %e, "leaderboard query failed");
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        }
    }
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/leaderboard", web::get().to(leaderboard))
        .route("/health", web::get().to(health));
}
