use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{delete, get},
    Json, Router,
};
use birthdays_core::birthdays::{Birthday, NewBirthday};
use birthdays_core::errors::{Error as CoreError, ValidationError};
use serde::Deserialize;

use crate::{
    error::ApiResult,
    extract::{Form, Path},
    main_lib::AppState,
    templates,
    turbo::{self, TurboStream, TurboStreamSupport},
};

#[derive(Debug, Deserialize)]
pub struct CreateBirthdayForm {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

fn required(field: &str, value: Option<String>) -> Result<String, CoreError> {
    value.ok_or_else(|| ValidationError::MissingField(field.to_string()).into())
}

async fn home() -> Html<String> {
    Html(templates::home_page())
}

async fn list_birthdays(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let birthdays = state.birthday_service.list_active_birthdays()?;
    Ok(Html(templates::birthday_list(&birthdays)))
}

async fn create_birthday(
    State(state): State<Arc<AppState>>,
    turbo_support: TurboStreamSupport,
    Form(form): Form<CreateBirthdayForm>,
) -> ApiResult<Response> {
    let name = required("name", form.name)?;
    let date = required("date", form.date)?;
    let new_birthday = NewBirthday::parse(&name, &date)?;
    let birthday = state.birthday_service.create_birthday(new_birthday).await?;

    if turbo_support.is_supported() {
        let fragment = turbo::append(turbo::BIRTHDAYS_TARGET, &templates::birthday_row(&birthday));
        return Ok(TurboStream(fragment).into_response());
    }
    Ok(Redirect::to("/").into_response())
}

async fn delete_birthday(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    turbo_support: TurboStreamSupport,
) -> ApiResult<Response> {
    let outcome = state.birthday_service.delete_birthday(id).await?;

    if turbo_support.is_supported() {
        let fragment = turbo::remove(&templates::row_dom_id(outcome.birthday.id));
        return Ok(TurboStream(fragment).into_response());
    }
    Ok(Redirect::to("/").into_response())
}

async fn get_birthday(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Birthday>> {
    let birthday = state.birthday_service.get_birthday(id)?;
    Ok(Json(birthday))
}

/// Browser-facing routes: page, list fragment, form submission and deletion.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home).post(create_birthday))
        .route("/birthdays", get(list_birthdays))
        .route("/delete/{id}", delete(delete_birthday))
}

pub fn api_router() -> Router<Arc<AppState>> {
    Router::new().route("/birthdays/{id}", get(get_birthday))
}
