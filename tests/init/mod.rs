mod init_creates_control_layout;
mod init_is_idempotent;
mod commands_fail_outside_a_repository;
