pub mod label_handler;
