mod authentication;
mod data_formats;
mod errors;
mod handlers;
mod models;
mod stores;

pub use anyhow::Result;
pub use authentication::{decode_token, issue_token};
use axum::http::StatusCode;
use axum::{routing::*, Extension, Json, Router};
pub use data_formats::*;
pub use errors::RequestError;
use handlers::*;
pub use models::{Comment, Post, User};
use std::{
    net::{SocketAddr, TcpListener},
    sync::Arc,
};
pub use stores::*;
use tokio::sync::RwLock;

pub type JsonResponse<T> = (StatusCode, Json<T>);

pub async fn run_app(app: Router, address: SocketAddr) -> Result<()> {
    let state: SharedState = Arc::new(RwLock::new(AppState::new()));
    let app = app.layer(Extension(state));
    axum::Server::bind(&address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

pub fn get_random_free_port() -> (u16, SocketAddr) {
    let listener = TcpListener::bind("localhost:0").unwrap();
    match listener.local_addr() {
        Ok(addr) => (addr.port(), addr),
        Err(_) => panic!("Could not get a free port"),
    }
}

pub fn make_router() -> Router {
    Router::new()
        .route("/check_health", get(alive))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/users/:user_id", get(get_user).put(update_profile))
        .route("/api/users/:user_id/follow", post(follow_user))
        .route("/api/users/:user_id/unfollow", post(unfollow_user))
        .route("/api/posts/create", post(create_post))
        .route("/api/posts", get(get_feed))
        .route("/api/posts/user/:user_id", get(get_user_posts))
        .route(
            "/api/posts/:post_id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/api/posts/:post_id/like", post(like_post))
        .route("/api/posts/:post_id/unlike", post(unlike_post))
        .route("/api/posts/:post_id/comment", post(add_comment))
        .route("/api/posts/:post_id/comments", get(get_comments))
        .route("/api/comments/:comment_id", delete(delete_comment))
        .fallback(not_found)
}
