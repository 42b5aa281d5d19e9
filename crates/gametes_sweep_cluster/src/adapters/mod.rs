pub mod command_submitter;
