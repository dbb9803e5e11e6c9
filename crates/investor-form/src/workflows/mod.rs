pub mod new_account;
