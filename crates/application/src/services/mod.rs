pub mod message_codec;
