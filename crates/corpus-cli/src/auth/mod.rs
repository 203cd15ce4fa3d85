mod form;
mod login;
mod logout;
mod register;
mod status;

pub(crate) use login::{LoginArgs, login};
pub(crate) use logout::logout;
pub(crate) use register::{RegisterArgs, register};
pub(crate) use status::status;
