//! Global popup selection and the popup's own player.

pub mod coordinator;
pub mod player;

pub use coordinator::{
    PopupCoordinator, PopupEvent, PopupOrigin, PopupSelection, PopupSession,
    PopupSessionId, PopupSubscription,
};
pub use player::PopupPlayer;
