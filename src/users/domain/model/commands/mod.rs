pub mod approve_user_command;
pub mod register_user_command;
