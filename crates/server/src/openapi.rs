use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Serialized account as returned by every read/write endpoint.
#[derive(ToSchema)]
pub struct AccountDoc {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: Option<String>,
    /// ISO-8601 date, `YYYY-MM-DD`
    pub date_joined: Option<String>,
}

/// Create/update body. On create `name` is required together with `email` or `address`.
#[derive(ToSchema)]
pub struct AccountInputDoc {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub date_joined: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::index,
        crate::routes::health,
        crate::routes::accounts::list,
        crate::routes::accounts::create,
        crate::routes::accounts::read,
        crate::routes::accounts::update,
        crate::routes::accounts::delete,
    ),
    components(
        schemas(
            HealthResponse,
            AccountDoc,
            AccountInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "accounts")
    )
)]
pub struct ApiDoc;
