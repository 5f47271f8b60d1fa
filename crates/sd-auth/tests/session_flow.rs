//! Session lifecycle over the file-backed credential store.

use std::sync::Arc;

use base64::Engine as _;
use sd_auth::{Capability, CredentialStore, Identity, KeyringCredentialStore, Session};
use sd_core::enums::Role;
use sd_core::responses::TokenPair;

fn jwt(payload: &str) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}.{}.{}",
        engine.encode(r#"{"alg":"HS256"}"#),
        engine.encode(payload),
        engine.encode("sig")
    )
}

#[test]
fn login_persists_and_survives_restart() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let store = Arc::new(KeyringCredentialStore::file_only(tmp.path()));
    let session = Session::bootstrap(store);

    let identity = session
        .set_credentials(&TokenPair {
            access: jwt(r#"{"user_id":11,"role":"QA"}"#),
            refresh: "refresh-11".into(),
        })
        .expect("login");
    assert!(identity.can(Capability::ReportBug));

    let restarted = Session::bootstrap(Arc::new(KeyringCredentialStore::file_only(tmp.path())));
    assert_eq!(restarted.identity(), Identity::authenticated(11, Some(Role::Qa)));
    assert_eq!(
        restarted.credentials().load_refresh().as_deref(),
        Some("refresh-11")
    );
}

#[test]
fn corrupted_file_credential_is_removed_on_bootstrap() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    std::fs::write(
        tmp.path().join("credentials"),
        r#"{"access":"garbage","refresh":"r"}"#,
    )
    .expect("write");

    let session = Session::bootstrap(Arc::new(KeyringCredentialStore::file_only(tmp.path())));
    assert!(!session.identity().is_authenticated);
    assert!(!tmp.path().join("credentials").exists());
}

#[test]
fn logout_hides_every_gate() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let session = Session::bootstrap(Arc::new(KeyringCredentialStore::file_only(tmp.path())));
    session
        .set_credentials(&TokenPair {
            access: jwt(r#"{"user_id":1,"role":"ADMIN"}"#),
            refresh: "r".into(),
        })
        .expect("login");
    let rx = session.subscribe();
    assert!(rx.borrow().can(Capability::DeleteProject));

    session.logout().expect("logout");
    assert!(
        Capability::ALL
            .into_iter()
            .all(|capability| !rx.borrow().can(capability))
    );
}
