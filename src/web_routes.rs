use crate::api_state::AppState;
use chrono::Local;
use rocket::http::Status;
use rocket::State;
use rocket_dyn_templates::{context, Template};

/// GET / - All hosts, split into bad, good and ignored mounts
#[get("/")]
pub fn index(state: &State<AppState>) -> Result<Template, Status> {
    let view = state.registry().list_all()?;
    let bad_hosts = view.bad.len();
    let good_hosts = view.good.len();
    let ignored_hosts = view.ignored.len();
    let total_mounts = view.total_mounts();

    Ok(Template::render(
        "index",
        context! {
            title: "Backup status",
            active_tab: "index",
            bad_hosts,
            good_hosts,
            ignored_hosts,
            total_mounts,
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            view,
        },
    ))
}

/// GET /exceptions - Mounts excluded from monitoring
#[get("/exceptions")]
pub fn exceptions(state: &State<AppState>) -> Result<Template, Status> {
    render_exceptions(state)
}

/// POST /exceptions - Same page, for forms that post back to it
#[post("/exceptions")]
pub fn exceptions_post(state: &State<AppState>) -> Result<Template, Status> {
    render_exceptions(state)
}

fn render_exceptions(state: &AppState) -> Result<Template, Status> {
    let exceptions = state.registry().exceptions()?;

    Ok(Template::render(
        "exceptions",
        context! {
            title: "Exceptions",
            active_tab: "exceptions",
            exceptions,
        },
    ))
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_client;
    use rocket::http::{ContentType, Status};

    #[test]
    fn test_index_renders_empty_registry() {
        let (_dir, client) = test_client();

        let response = client.get("/").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.content_type(), Some(ContentType::HTML));
        assert!(response.into_string().unwrap().contains("No hosts reported"));
    }

    #[test]
    fn test_index_lists_reported_hosts() {
        let (_dir, client) = test_client();

        client
            .get("/update?hostname=goodhost&mountpoint=%2Fsrv&backedup=1")
            .dispatch();
        client
            .get("/update?hostname=badhost&mountpoint=%2Fhome")
            .dispatch();
        client
            .get("/update?hostname=quiethost&mountpoint=%2Fscratch&ignore=1")
            .dispatch();

        let body = client.get("/").dispatch().into_string().unwrap();
        assert!(body.contains("goodhost"));
        assert!(body.contains("badhost"));
        assert!(body.contains("quiethost"));
        assert!(body.contains("srv"));
        assert!(body.contains("scratch"));
    }

    #[test]
    fn test_exceptions_lists_only_ignored_mounts() {
        let (_dir, client) = test_client();

        client
            .get("/update?hostname=quiethost&mountpoint=%2Fscratch&ignore=1")
            .dispatch();
        client
            .get("/update?hostname=loudhost&mountpoint=%2Fdata&backedup=1")
            .dispatch();

        let response = client.get("/exceptions").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_string().unwrap();
        assert!(body.contains("quiethost"));
        assert!(!body.contains("loudhost"));

        let response = client.post("/exceptions").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert!(response.into_string().unwrap().contains("quiethost"));
    }
}
