//! Hosted backend: PostgREST rows, GoTrue identity, Realtime change feed

mod client;
pub mod realtime;
pub mod session;

pub use client::SupabaseProvider;
pub use realtime::{
    FrameHandler, RealtimeChannel, RealtimeConnection, RealtimeTransport, TransportEvent,
    HEARTBEAT_INTERVAL_MS,
};
pub use session::{authorize_url, parse_redirect_fragment, Session, SessionError};
