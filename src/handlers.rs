use axum::{extract::Path, Extension, Json};

use crate::{
    authentication::{issue_token, MaybeUser},
    errors::RequestError,
    stores::{compose_feed, user_feed, SharedState},
    AuthWrapper, CommentRequest, CommentWrapper, CreatePostRequest, DeletedCommentWrapper,
    DeletedPostWrapper, FollowWrapper, LikeWrapper, LoginRequest, LoginUser, MessageWrapper,
    MultipleCommentsWrapper, MultiplePostsWrapper, PostWrapper, RegisterRequest,
    UpdatePostRequest, UpdateProfileRequest, UserWrapper,
};

type JsonResult<T> = Result<Json<T>, RequestError>;

// ----------------- Helper Handlers -----------------
pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found() -> RequestError {
    RequestError::NotFound("Page not found")
}

// ----------------- Auth Handlers -----------------
pub async fn login(
    Extension(state): Extension<SharedState>,
    Json(request): Json<LoginRequest>,
) -> JsonResult<AuthWrapper<LoginUser>> {
    if request.email.is_empty() || request.password.is_empty() {
        return Err(RequestError::Validation("Email and password are required"));
    }
    let state = state.read().await;
    // passwords are stored and compared as plaintext
    let user = state
        .users
        .find_by_email(&request.email)
        .filter(|user| user.password == request.password)
        .ok_or(RequestError::NotAuthenticated("Invalid email or password"))?;
    Ok(Json(AuthWrapper {
        success: true,
        message: "Logged in successfully",
        token: issue_token(user.id),
        user_id: user.id,
        user: LoginUser::new(user),
    }))
}

pub async fn register(
    Extension(state): Extension<SharedState>,
    Json(request): Json<RegisterRequest>,
) -> JsonResult<AuthWrapper<crate::models::User>> {
    let mut state = state.write().await;
    let user = state.users.register(request)?.clone();
    state.graph.init_user(user.id);
    Ok(Json(AuthWrapper {
        success: true,
        message: "Account created successfully",
        token: issue_token(user.id),
        user_id: user.id,
        user,
    }))
}

/// Tokens carry no server-side session, so logout is a bare acknowledgment;
/// previously issued tokens keep working.
pub async fn logout() -> Json<MessageWrapper> {
    Json(MessageWrapper {
        success: true,
        message: "Logged out successfully",
    })
}

// ----------------- User Handlers -----------------
pub async fn get_user(
    Extension(state): Extension<SharedState>,
    Path(user_id): Path<i64>,
) -> JsonResult<UserWrapper> {
    let state = state.read().await;
    let user = state.users.get(user_id)?.clone();
    Ok(Json(UserWrapper {
        success: true,
        message: None,
        user,
    }))
}

pub async fn update_profile(
    Extension(state): Extension<SharedState>,
    requester: MaybeUser,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateProfileRequest>,
) -> JsonResult<UserWrapper> {
    let mut state = state.write().await;
    let user = state
        .users
        .update_profile(user_id, requester.get_id(), request)?
        .clone();
    Ok(Json(UserWrapper {
        success: true,
        message: Some("Profile updated successfully"),
        user,
    }))
}

pub async fn follow_user(
    Extension(state): Extension<SharedState>,
    requester: MaybeUser,
    Path(user_id): Path<i64>,
) -> JsonResult<FollowWrapper> {
    let follower_id = requester
        .get_id()
        .ok_or(RequestError::NotAuthenticated("Please log in first"))?;
    let mut state = state.write().await;
    let state = &mut *state;
    state.graph.follow(&mut state.users, follower_id, user_id)?;
    Ok(Json(FollowWrapper {
        success: true,
        message: "Now following",
        user_id,
    }))
}

pub async fn unfollow_user(
    Extension(state): Extension<SharedState>,
    requester: MaybeUser,
    Path(user_id): Path<i64>,
) -> JsonResult<FollowWrapper> {
    let follower_id = requester
        .get_id()
        .ok_or(RequestError::NotAuthenticated("Please log in first"))?;
    let mut state = state.write().await;
    let state = &mut *state;
    state.graph.unfollow(&mut state.users, follower_id, user_id);
    Ok(Json(FollowWrapper {
        success: true,
        message: "Unfollowed successfully",
        user_id,
    }))
}

// ----------------- Post Handlers -----------------
pub async fn create_post(
    Extension(state): Extension<SharedState>,
    requester: MaybeUser,
    Json(request): Json<CreatePostRequest>,
) -> JsonResult<PostWrapper> {
    // the body names the author; it must match the token identity
    let author_id = requester
        .get_id()
        .filter(|id| *id == request.user_id)
        .ok_or(RequestError::Forbidden("Not allowed to create a post"))?;
    let mut state = state.write().await;
    let state = &mut *state;
    let post = state
        .posts
        .create(&mut state.users, author_id, request)?
        .clone();
    Ok(Json(PostWrapper {
        success: true,
        message: Some("Post created successfully"),
        post,
    }))
}

pub async fn get_feed(
    Extension(state): Extension<SharedState>,
    requester: MaybeUser,
) -> JsonResult<MultiplePostsWrapper> {
    let state = state.read().await;
    let posts = compose_feed(&state.posts, &state.graph, requester.get_id());
    Ok(Json(MultiplePostsWrapper {
        success: true,
        count: posts.len(),
        posts,
    }))
}

pub async fn get_user_posts(
    Extension(state): Extension<SharedState>,
    Path(user_id): Path<i64>,
) -> JsonResult<MultiplePostsWrapper> {
    let state = state.read().await;
    let posts = user_feed(&state.posts, user_id);
    Ok(Json(MultiplePostsWrapper {
        success: true,
        count: posts.len(),
        posts,
    }))
}

pub async fn get_post(
    Extension(state): Extension<SharedState>,
    Path(post_id): Path<i64>,
) -> JsonResult<PostWrapper> {
    let state = state.read().await;
    let post = state.posts.get(post_id)?.clone();
    Ok(Json(PostWrapper {
        success: true,
        message: None,
        post,
    }))
}

pub async fn update_post(
    Extension(state): Extension<SharedState>,
    requester: MaybeUser,
    Path(post_id): Path<i64>,
    Json(request): Json<UpdatePostRequest>,
) -> JsonResult<PostWrapper> {
    let mut state = state.write().await;
    let post = state
        .posts
        .update(post_id, requester.get_id(), request.content)?
        .clone();
    Ok(Json(PostWrapper {
        success: true,
        message: Some("Post updated successfully"),
        post,
    }))
}

pub async fn delete_post(
    Extension(state): Extension<SharedState>,
    requester: MaybeUser,
    Path(post_id): Path<i64>,
) -> JsonResult<DeletedPostWrapper> {
    let mut state = state.write().await;
    let state = &mut *state;
    let post_id = state
        .posts
        .delete(&mut state.users, post_id, requester.get_id())?;
    Ok(Json(DeletedPostWrapper {
        success: true,
        message: "Post deleted successfully",
        post_id,
    }))
}

// ----------------- Like Handlers -----------------
pub async fn like_post(
    Extension(state): Extension<SharedState>,
    requester: MaybeUser,
    Path(post_id): Path<i64>,
) -> JsonResult<LikeWrapper> {
    let user_id = requester
        .get_id()
        .ok_or(RequestError::NotAuthenticated("Please log in first"))?;
    let mut state = state.write().await;
    let state = &mut *state;
    let likes = state.engagement.like(&mut state.posts, user_id, post_id)?;
    Ok(Json(LikeWrapper {
        success: true,
        message: "Post liked",
        post_id,
        likes,
    }))
}

pub async fn unlike_post(
    Extension(state): Extension<SharedState>,
    requester: MaybeUser,
    Path(post_id): Path<i64>,
) -> JsonResult<LikeWrapper> {
    let user_id = requester
        .get_id()
        .ok_or(RequestError::NotAuthenticated("Please log in first"))?;
    let mut state = state.write().await;
    let state = &mut *state;
    let likes = state
        .engagement
        .unlike(&mut state.posts, user_id, post_id)?;
    Ok(Json(LikeWrapper {
        success: true,
        message: "Post unliked",
        post_id,
        likes,
    }))
}

// ----------------- Comment Handlers -----------------
pub async fn add_comment(
    Extension(state): Extension<SharedState>,
    requester: MaybeUser,
    Path(post_id): Path<i64>,
    Json(request): Json<CommentRequest>,
) -> JsonResult<CommentWrapper> {
    let user_id = requester
        .get_id()
        .ok_or(RequestError::NotAuthenticated("Please log in first"))?;
    let mut state = state.write().await;
    let state = &mut *state;
    let comment = state
        .engagement
        .add_comment(
            &state.users,
            &mut state.posts,
            user_id,
            post_id,
            request.content,
        )?
        .clone();
    Ok(Json(CommentWrapper {
        success: true,
        message: "Comment added successfully",
        comment,
    }))
}

pub async fn get_comments(
    Extension(state): Extension<SharedState>,
    Path(post_id): Path<i64>,
) -> JsonResult<MultipleCommentsWrapper> {
    let state = state.read().await;
    let comments = state.engagement.comments_for(post_id);
    Ok(Json(MultipleCommentsWrapper {
        success: true,
        count: comments.len(),
        comments,
    }))
}

pub async fn delete_comment(
    Extension(state): Extension<SharedState>,
    requester: MaybeUser,
    Path(comment_id): Path<i64>,
) -> JsonResult<DeletedCommentWrapper> {
    let mut state = state.write().await;
    let state = &mut *state;
    let comment_id =
        state
            .engagement
            .delete_comment(&mut state.posts, comment_id, requester.get_id())?;
    Ok(Json(DeletedCommentWrapper {
        success: true,
        message: "Comment deleted successfully",
        comment_id,
    }))
}
