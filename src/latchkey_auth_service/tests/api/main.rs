mod helpers;
mod protected;
mod request_login;
mod verify;
