pub(crate) mod channel;
