//! Contract-level behavior of the scripted authenticator, exercised without
//! a flow in front of it.

use eniro::auth::{AuthErrorCode, AuthOutcome, Authenticator, Scenario, ScriptedAuthenticator};
use std::time::{Duration, Instant};

const SHORT_DELAY: Duration = Duration::from_millis(10);

fn scripted(scenario: Scenario) -> ScriptedAuthenticator {
    ScriptedAuthenticator::new(scenario).with_delay(SHORT_DELAY)
}

#[tokio::test]
async fn every_failure_scenario_reports_its_code_and_stock_message() {
    for scenario in Scenario::all() {
        if scenario == Scenario::Success || scenario == Scenario::Timeout {
            continue;
        }

        let expected_code = scenario.code().expect("failure scenario must carry a code");
        let outcome = scripted(scenario)
            .authenticate("test@company.com", "Password123!")
            .await
            .expect("authenticate should not error");

        let AuthOutcome::Failure { message, code } = outcome else {
            panic!("{scenario:?} should fail");
        };
        assert_eq!(code, Some(expected_code), "{scenario:?}");
        assert_eq!(message, expected_code.default_message(), "{scenario:?}");
    }
}

#[tokio::test]
async fn timeout_scenario_stalls_then_still_fails() {
    let stall = Duration::from_millis(60);
    let authenticator = scripted(Scenario::Timeout).with_timeout_stall(stall);

    let started = Instant::now();
    let outcome = authenticator
        .authenticate("test@company.com", "Password123!")
        .await
        .expect("authenticate should not error");

    assert!(started.elapsed() >= stall);
    let AuthOutcome::Failure { message, code } = outcome else {
        panic!("timeout scenario should fail");
    };
    assert_eq!(code, Some(AuthErrorCode::Timeout));
    assert!(message.contains("Request timed out"));
}

#[tokio::test]
async fn success_scenario_validates_the_credential_table() {
    let authenticator = scripted(Scenario::Success);

    let outcome = authenticator
        .authenticate("demo@company.com", "DemoPass99!")
        .await
        .expect("authenticate should not error");
    let AuthOutcome::Success { user } = outcome else {
        panic!("valid pair should succeed");
    };
    assert_eq!(user.email, "demo@company.com");
    assert!(!user.id.is_empty());
    assert!(!user.access_token.is_empty());

    let outcome = authenticator
        .authenticate("demo@company.com", "NotTheOne1!")
        .await
        .expect("authenticate should not error");
    let AuthOutcome::Failure { code, .. } = outcome else {
        panic!("wrong pair should fail");
    };
    assert_eq!(code, Some(AuthErrorCode::InvalidCredentials));
}

#[tokio::test]
async fn message_override_replaces_the_stock_text() {
    let outcome = scripted(Scenario::RateLimited429)
        .with_message("Slow down, please")
        .authenticate("test@company.com", "Password123!")
        .await
        .expect("authenticate should not error");

    assert_eq!(
        outcome,
        AuthOutcome::Failure {
            message: "Slow down, please".to_string(),
            code: Some(AuthErrorCode::RateLimited429),
        }
    );
}

#[tokio::test]
async fn override_does_not_leak_into_success() {
    let outcome = scripted(Scenario::Success)
        .with_message("never shown")
        .authenticate("qa@company.com", "QualityFirst1")
        .await
        .expect("authenticate should not error");

    assert!(outcome.is_success());
}
