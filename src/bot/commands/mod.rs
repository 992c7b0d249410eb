//! Command modules for the bot, grouped by concern.
//!
//! Every handler follows the same shape: validate options, call one core
//! operation, phrase the outcome. Denials and lookup failures are replied
//! inline via [`crate::errors::Error::user_message`]; unexpected errors
//! propagate to the framework error handler.

/// Admin commands (setconfig, addcontact, updatecontact)
pub mod admin;
/// Event commands (createevent, checkin)
pub mod event;
/// General commands (ping, help)
pub mod general;
/// Member identity commands (claim, profile, find)
pub mod member;
/// Membership term commands (grantmembership, cancelmembership)
pub mod membership;
/// Points ledger commands (balance, pay, grant, leaderboard)
pub mod points;
/// Tutor commands (tutorlog, tutorstats)
pub mod tutor;
