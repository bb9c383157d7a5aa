mod channel_queue;
mod inline_queue;
mod mock_queue;

pub use channel_queue::ChannelJobQueue;
pub use inline_queue::InlineJobQueue;
pub use mock_queue::MockJobQueue;
