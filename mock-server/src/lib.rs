use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub job: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Story {
    pub id: u64,
    pub title: String,
    pub url: Option<String>,
    pub vote_count: u32,
    pub comment_count: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: u64,
    pub story_id: u64,
    pub parent_id: Option<u64>,
    pub user_id: u64,
    pub body: String,
    pub vote_count: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Motd {
    pub message: String,
    pub upvote_count: u32,
    pub downvote_count: u32,
}

#[derive(Deserialize)]
pub struct ReplyForm {
    #[serde(rename = "comment[body]", default)]
    pub body: String,
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug)]
pub struct Store {
    pub user: User,
    pub stories: BTreeMap<u64, Story>,
    pub comments: BTreeMap<u64, Comment>,
    pub motd: Motd,
    next_comment_id: u64,
}

impl Store {
    /// A small fixed data set: three stories, two comments and a MOTD.
    pub fn seeded() -> Self {
        let stories = [
            (1, "Flat design is dead, long live flat design", Some("https://example.com/flat"), 12, 1),
            (2, "Show DN: A button generator", Some("https://example.com/buttons"), 30, 1),
            (3, "Ask DN: How do you name your layers?", None, 5, 0),
        ]
        .into_iter()
        .map(|(id, title, url, vote_count, comment_count)| {
            let story = Story {
                id,
                title: title.to_string(),
                url: url.map(str::to_string),
                vote_count,
                comment_count,
            };
            (id, story)
        })
        .collect();

        let comments = [(1, 1, "Long live it indeed."), (2, 2, "Nice buttons!")]
            .into_iter()
            .map(|(id, story_id, body)| {
                let comment = Comment {
                    id,
                    story_id,
                    parent_id: None,
                    user_id: 1,
                    body: body.to_string(),
                    vote_count: 0,
                };
                (id, comment)
            })
            .collect();

        Self {
            user: User {
                id: 1,
                first_name: "Ada".to_string(),
                last_name: "Pixel".to_string(),
                job: "Designer".to_string(),
            },
            stories,
            comments,
            motd: Motd {
                message: "Ship it.".to_string(),
                upvote_count: 0,
                downvote_count: 0,
            },
            next_comment_id: 3,
        }
    }

    fn add_comment(&mut self, story_id: u64, parent_id: Option<u64>, body: String) -> Comment {
        let comment = Comment {
            id: self.next_comment_id,
            story_id,
            parent_id,
            user_id: self.user.id,
            body,
            vote_count: 0,
        };
        self.next_comment_id += 1;
        self.comments.insert(comment.id, comment.clone());
        if let Some(story) = self.stories.get_mut(&story_id) {
            story.comment_count += 1;
        }
        comment
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    access_token: Arc<str>,
    db: Db,
}

/// JSON error envelope, `{"error": "..."}`, with a status code.
pub struct MockError(StatusCode, String);

impl MockError {
    fn not_found(what: &str, id: u64) -> Self {
        Self(StatusCode::NOT_FOUND, format!("{what} {id} not found"))
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "error": self.1 }))).into_response()
    }
}

/// Router serving the v1 API under `/api/v1`. Every route requires
/// `Authorization: Bearer <access_token>`.
pub fn app(access_token: &str) -> Router {
    let state = AppState {
        access_token: Arc::from(access_token),
        db: Arc::new(RwLock::new(Store::seeded())),
    };

    let api = Router::new()
        .route("/me", get(me))
        .route("/stories", get(top_stories))
        .route("/stories/recent", get(recent_stories))
        .route("/stories/search", get(search_stories))
        .route("/stories/{id}", get(get_story))
        .route("/stories/{id}/upvote", post(upvote_story))
        .route("/stories/{id}/reply", post(reply_to_story))
        .route("/comments/{id}", get(get_comment))
        .route("/comments/{id}/upvote", post(upvote_comment))
        .route("/comments/{id}/reply", post(reply_to_comment))
        .route("/motd", get(get_motd))
        .route("/motd/upvote", post(upvote_motd))
        .route("/motd/downvote", post(downvote_motd))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .with_state(state);

    Router::new().nest("/api/v1", api)
}

pub async fn run(listener: TcpListener, access_token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(access_token)).await
}

async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", state.access_token);
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected);
    if !authorized {
        return MockError(StatusCode::UNAUTHORIZED, "invalid or missing access token".to_string())
            .into_response();
    }
    next.run(request).await
}

async fn me(State(state): State<AppState>) -> Json<Value> {
    let db = state.db.read().await;
    Json(json!({ "me": db.user }))
}

async fn top_stories(State(state): State<AppState>) -> Json<Value> {
    let db = state.db.read().await;
    let mut stories: Vec<&Story> = db.stories.values().collect();
    stories.sort_by(|a, b| b.vote_count.cmp(&a.vote_count).then(a.id.cmp(&b.id)));
    Json(json!({ "stories": stories }))
}

async fn recent_stories(State(state): State<AppState>) -> Json<Value> {
    let db = state.db.read().await;
    let stories: Vec<&Story> = db.stories.values().rev().collect();
    Json(json!({ "stories": stories }))
}

async fn search_stories(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Value> {
    let db = state.db.read().await;
    let needle = params.query.to_lowercase();
    let stories: Vec<&Story> = if needle.is_empty() {
        Vec::new()
    } else {
        db.stories
            .values()
            .filter(|story| story.title.to_lowercase().contains(&needle))
            .collect()
    };
    Json(json!({ "stories": stories }))
}

async fn get_story(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, MockError> {
    let db = state.db.read().await;
    let story = db.stories.get(&id).ok_or_else(|| MockError::not_found("story", id))?;
    let comments: Vec<&Comment> = db.comments.values().filter(|c| c.story_id == id).collect();
    Ok(Json(json!({ "story": story, "comments": comments })))
}

async fn upvote_story(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, MockError> {
    let mut db = state.db.write().await;
    let story = db.stories.get_mut(&id).ok_or_else(|| MockError::not_found("story", id))?;
    story.vote_count += 1;
    Ok(Json(json!({ "story": story })))
}

async fn reply_to_story(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(input): Form<ReplyForm>,
) -> Result<(StatusCode, Json<Value>), MockError> {
    let body = non_empty(input.body)?;
    let mut db = state.db.write().await;
    if !db.stories.contains_key(&id) {
        return Err(MockError::not_found("story", id));
    }
    let comment = db.add_comment(id, None, body);
    Ok((StatusCode::CREATED, Json(json!({ "comment": comment }))))
}

async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, MockError> {
    let db = state.db.read().await;
    let comment = db.comments.get(&id).ok_or_else(|| MockError::not_found("comment", id))?;
    Ok(Json(json!({ "comment": comment })))
}

async fn upvote_comment(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, MockError> {
    let mut db = state.db.write().await;
    let comment = db.comments.get_mut(&id).ok_or_else(|| MockError::not_found("comment", id))?;
    comment.vote_count += 1;
    Ok(Json(json!({ "comment": comment })))
}

async fn reply_to_comment(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(input): Form<ReplyForm>,
) -> Result<(StatusCode, Json<Value>), MockError> {
    let body = non_empty(input.body)?;
    let mut db = state.db.write().await;
    let story_id = db
        .comments
        .get(&id)
        .map(|parent| parent.story_id)
        .ok_or_else(|| MockError::not_found("comment", id))?;
    let comment = db.add_comment(story_id, Some(id), body);
    Ok((StatusCode::CREATED, Json(json!({ "comment": comment }))))
}

async fn get_motd(State(state): State<AppState>) -> Json<Value> {
    let db = state.db.read().await;
    Json(json!({ "motd": db.motd }))
}

async fn upvote_motd(State(state): State<AppState>) -> Json<Value> {
    let mut db = state.db.write().await;
    db.motd.upvote_count += 1;
    Json(json!({ "motd": db.motd }))
}

async fn downvote_motd(State(state): State<AppState>) -> Json<Value> {
    let mut db = state.db.write().await;
    db.motd.downvote_count += 1;
    Json(json!({ "motd": db.motd }))
}

fn non_empty(body: String) -> Result<String, MockError> {
    if body.trim().is_empty() {
        return Err(MockError(
            StatusCode::UNPROCESSABLE_ENTITY,
            "comment body can't be blank".to_string(),
        ));
    }
    Ok(body)
}
