mod inbound_message_test;
mod storage_path_test;
