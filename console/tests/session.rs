//! Console sessions against the live mock server.

use billing_console::cli::{Action, Screen};
use billing_console::session::Session;
use billing_console::shell;
use billing_console::transport::UreqTransport;
use billing_core::{Api, BillingClient};
use billing_mock_server::Db;

type LiveApi = Api<UreqTransport>;

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            billing_mock_server::run_with_store(listener, Db::default()).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn session(base: &str) -> Session<LiveApi> {
    let api = Api::new(BillingClient::new(base), UreqTransport::new());
    Session::new(api, base)
}

#[test]
fn create_then_subscribe_keeps_user_between_actions() {
    let base = start_server();
    let mut session = session(&base);

    let outcome = session.run(Action::Subscribe {
        user_id: None,
        plan: None,
    });
    assert!(!outcome.ok);
    assert!(outcome.screen.ends_with("create a user first"));

    let outcome = session.run(Action::CreateUser {
        email: Some("ops@example.com".to_string()),
    });
    assert!(outcome.ok);
    assert!(outcome.screen.contains("user created"));

    let outcome = session.run(Action::Subscribe {
        user_id: None,
        plan: Some("pro".to_string()),
    });
    assert!(outcome.ok, "{}", outcome.screen);
    assert!(outcome.screen.contains("subscribed: "));
    assert!(outcome.screen.contains("plan: pro"));
}

#[test]
fn history_for_unknown_user_is_empty() {
    let base = start_server();
    let mut session = session(&base);

    let outcome = session.run(Action::Invoices {
        user_id: Some("nobody".to_string()),
    });
    assert!(outcome.ok);
    assert_eq!(outcome.screen, "Invoices\nNo invoices.");

    let outcome = session.run(Action::Payments {
        user_id: Some("nobody".to_string()),
    });
    assert_eq!(outcome.screen, "Payments\nNo payments.");
}

#[test]
fn failed_generate_reports_error_text() {
    let base = start_server();
    let mut session = session(&base);

    let outcome = session.run(Action::GenerateInvoice {
        user_id: Some("nobody".to_string()),
    });
    assert!(!outcome.ok);
    assert!(outcome
        .screen
        .ends_with(r#"404: {"detail":"active subscription not found"}"#));
}

#[test]
fn show_renders_without_request() {
    let mut session = session("http://127.0.0.1:9");
    let outcome = session.run(Action::Show {
        screen: Screen::Dashboard,
    });
    assert!(outcome.ok);
    assert_eq!(
        outcome.screen,
        "Dashboard\nAPI: http://127.0.0.1:9\nAPI health: checking..."
    );
}

#[test]
fn shell_runs_actions_in_order() {
    let base = start_server();
    let mut session = session(&base);

    let input = "plans\n\nbogus\nusage --user-id u1 --quantity 5\nquit\nplans\n";
    let mut output = Vec::new();
    shell::run(&mut session, input.as_bytes(), &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();

    assert!(text.starts_with("Dashboard\n"));
    assert!(text.contains("API health: ok"));
    assert!(text.contains("$99.00/mo"));
    assert!(text.contains("usage recorded"));
    assert!(text.contains("quantity: 5"));
    assert_eq!(text.matches("Plans\n").count(), 1);
}
