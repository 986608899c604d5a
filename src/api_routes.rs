use crate::api_state::AppState;
use crate::models::api::*;
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::State;

/// Reply for /update: JSON acknowledgment, or a redirect back to the overview
#[derive(Responder)]
pub enum UpdateReply {
    Redirect(Redirect),
    Ack(Json<StatusAck>),
}

/// GET /update - Report a mount's backup status via query string
#[get("/update?<params..>")]
pub fn update_get(params: UpdateParams, state: &State<AppState>) -> Result<UpdateReply, Status> {
    apply_update(&params, state)
}

/// POST /update - Report a mount's backup status via form body
#[post("/update", data = "<params>")]
pub fn update_post(
    params: Form<UpdateParams>,
    state: &State<AppState>,
) -> Result<UpdateReply, Status> {
    apply_update(&params, state)
}

fn apply_update(params: &UpdateParams, state: &AppState) -> Result<UpdateReply, Status> {
    state.registry().upsert(
        &params.hostname,
        &params.mountpoint,
        params.backedup,
        params.ignore,
    )?;

    if params.redirect.is_set() {
        Ok(UpdateReply::Redirect(Redirect::to("/")))
    } else {
        Ok(UpdateReply::Ack(Json(StatusAck::ok())))
    }
}

/// GET /query - Current backup status of a mount
#[get("/query?<params..>")]
pub fn query_get(
    params: QueryParams,
    state: &State<AppState>,
) -> Result<Json<QueryResponse>, Status> {
    lookup(&params, state)
}

/// POST /query - Current backup status of a mount
#[post("/query", data = "<params>")]
pub fn query_post(
    params: Form<QueryParams>,
    state: &State<AppState>,
) -> Result<Json<QueryResponse>, Status> {
    lookup(&params, state)
}

fn lookup(params: &QueryParams, state: &AppState) -> Result<Json<QueryResponse>, Status> {
    let backedup = state
        .registry()
        .query(&params.hostname, &params.mountpoint)?;

    Ok(Json(QueryResponse {
        status: true,
        status_code: 200,
        backedup,
    }))
}

/// GET /health - Health check endpoint
#[get("/health")]
pub fn health_check(state: &State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_client;
    use rocket::http::{ContentType, Status};
    use serde_json::{json, Value};

    #[test]
    fn test_update_then_query_over_get() {
        let (_dir, client) = test_client();

        let response = client
            .get("/update?hostname=hostA&mountpoint=%2Fmnt%2Fdata%2F&backedup=1")
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.into_json::<Value>().unwrap(),
            json!({"status": true, "status_code": 200})
        );

        let response = client
            .get("/query?hostname=hostA&mountpoint=%2Fmnt%2Fdata")
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.into_json::<Value>().unwrap(),
            json!({"status": true, "status_code": 200, "backedup": 1})
        );
    }

    #[test]
    fn test_update_then_query_over_post() {
        let (_dir, client) = test_client();

        let response = client
            .post("/update")
            .header(ContentType::Form)
            .body("hostname=hostB&mountpoint=%2Fmnt%2Fx&backedup=1&csrf_token=ignored")
            .dispatch();
        assert_eq!(response.status(), Status::Ok);

        let response = client
            .post("/query")
            .header(ContentType::Form)
            .body("hostname=hostB&mountpoint=%2Fmnt%2Fx%2F")
            .dispatch();
        let body = response.into_json::<Value>().unwrap();
        assert_eq!(body["backedup"], 1);
    }

    #[test]
    fn test_query_unknown_mount_returns_zero() {
        let (_dir, client) = test_client();

        let response = client
            .get("/query?hostname=unknownHost&mountpoint=%2Fnone")
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_json::<Value>().unwrap()["backedup"], 0);
    }

    #[test]
    fn test_last_update_wins() {
        let (_dir, client) = test_client();

        client
            .get("/update?hostname=hostC&mountpoint=%2Fsrv&backedup=1")
            .dispatch();
        client
            .get("/update?hostname=hostC&mountpoint=%2Fsrv&backedup=0")
            .dispatch();

        let response = client
            .get("/query?hostname=hostC&mountpoint=%2Fsrv")
            .dispatch();
        assert_eq!(response.into_json::<Value>().unwrap()["backedup"], 0);
    }

    #[test]
    fn test_update_with_redirect_goes_to_overview() {
        let (_dir, client) = test_client();

        let response = client
            .get("/update?hostname=hostA&mountpoint=%2Fdata&ignore=1&redirect=1")
            .dispatch();
        assert_eq!(response.status(), Status::SeeOther);
        assert_eq!(response.headers().get_one("Location"), Some("/"));
    }

    #[test]
    fn test_post_without_hostname_is_rejected() {
        let (_dir, client) = test_client();

        let response = client
            .post("/update")
            .header(ContentType::Form)
            .body("mountpoint=%2Fdata")
            .dispatch();
        assert_eq!(response.status(), Status::UnprocessableEntity);
    }

    #[test]
    fn test_get_with_invalid_flag_is_rejected() {
        let (_dir, client) = test_client();

        let response = client
            .get("/update?hostname=hostA&mountpoint=%2Fdata&backedup=maybe")
            .dispatch();
        assert_ne!(response.status(), Status::Ok);

        let response = client
            .get("/query?hostname=hostA&mountpoint=%2Fdata")
            .dispatch();
        assert_eq!(response.into_json::<Value>().unwrap()["backedup"], 0);
    }

    #[test]
    fn test_health_check() {
        let (_dir, client) = test_client();

        let response = client.get("/health").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_json::<Value>().unwrap();
        assert_eq!(body["status"], "ok");
        assert!(body["uptime_seconds"].as_i64().unwrap() >= 0);
    }
}
