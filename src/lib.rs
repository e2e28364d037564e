//! # Eniro (Login Flow Core)
//!
//! `eniro` is the screen-independent core of a single-screen login flow:
//! field validation, a pluggable authentication contract, and an observable
//! state holder the rendering layer subscribes to.
//!
//! ## Components
//!
//! Three components composed linearly, data flowing one direction:
//!
//! - [`validator`] — pure, total functions mapping raw email/password input
//!   to an optional field-level error message.
//! - [`auth`] — the [`auth::Authenticator`] contract plus two
//!   interchangeable implementations: a mock remote used by production
//!   wiring and a scripted fake that replays a named scenario for tests.
//! - [`flow`] — [`flow::LoginFlow`], which owns the observable
//!   [`flow::LoginState`], applies the validator on every edit, and
//!   dispatches at most one authentication call at a time.
//!
//! ## Boundaries
//!
//! The rendering layer, navigation, and dependency wiring live outside this
//! crate. The composition root constructs a [`flow::LoginFlow`] with a
//! concrete authenticator and reacts to state snapshots; nothing in here
//! performs I/O beyond simulated latency.

pub mod auth;
pub mod flow;
pub mod validator;

pub use self::auth::{AuthErrorCode, AuthOutcome, Authenticator, UserRecord};
pub use self::flow::{LoginFlow, LoginState};
