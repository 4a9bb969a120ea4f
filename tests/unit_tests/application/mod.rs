mod message_dispatcher_test;
mod structured_output_test;
