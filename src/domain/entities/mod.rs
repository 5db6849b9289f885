pub mod card;
pub mod delivery;
pub mod interaction;
pub mod notification;
