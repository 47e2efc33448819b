//! Auth Handlers

mod session;
pub(crate) mod signin;
pub(crate) mod signout;
pub(crate) mod signup;
