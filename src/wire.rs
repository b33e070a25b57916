//! Typed object ids and event messages of the primary selection protocol
//! family, mirrored from `primary-selection-unstable-v1.xml`.
//!
//! The transport is not part of this crate. Instead of being serialized,
//! events are queued on the owning client as values and drained by the host
//! runtime.

use {
    crate::{
        client::EventFormatter,
        object::{Interface, ObjectId},
    },
    std::rc::Rc,
    uapi::OwnedFd,
};

id!(WlSeatId);
id!(ZwpPrimarySelectionDeviceManagerV1Id);
id!(ZwpPrimarySelectionDeviceV1Id);
id!(ZwpPrimarySelectionOfferV1Id);
id!(ZwpPrimarySelectionSourceV1Id);

pub const ZWP_PRIMARY_SELECTION_DEVICE_MANAGER_V1: Interface =
    Interface("zwp_primary_selection_device_manager_v1");
pub const ZWP_PRIMARY_SELECTION_DEVICE_V1: Interface =
    Interface("zwp_primary_selection_device_v1");
pub const ZWP_PRIMARY_SELECTION_OFFER_V1: Interface = Interface("zwp_primary_selection_offer_v1");
pub const ZWP_PRIMARY_SELECTION_SOURCE_V1: Interface =
    Interface("zwp_primary_selection_source_v1");

pub mod zwp_primary_selection_device_v1 {
    use super::*;

    /// A new offer object is introduced to the device. Always followed by the
    /// offer's mime types and a `selection` event.
    #[derive(Debug)]
    pub struct DataOffer {
        pub self_id: ZwpPrimarySelectionDeviceV1Id,
        pub offer: ZwpPrimarySelectionOfferV1Id,
    }

    #[derive(Debug)]
    pub struct Selection {
        pub self_id: ZwpPrimarySelectionDeviceV1Id,
        pub id: ZwpPrimarySelectionOfferV1Id,
    }
}

pub mod zwp_primary_selection_offer_v1 {
    use super::*;

    #[derive(Debug)]
    pub struct Offer {
        pub self_id: ZwpPrimarySelectionOfferV1Id,
        pub mime_type: String,
    }
}

pub mod zwp_primary_selection_source_v1 {
    use super::*;

    #[derive(Debug)]
    pub struct Send {
        pub self_id: ZwpPrimarySelectionSourceV1Id,
        pub mime_type: String,
        pub fd: Rc<OwnedFd>,
    }

    #[derive(Debug)]
    pub struct Cancelled {
        pub self_id: ZwpPrimarySelectionSourceV1Id,
    }
}

/// A server-to-client message waiting in a client's outgoing queue.
#[derive(Debug)]
pub enum Event {
    DataOffer(zwp_primary_selection_device_v1::DataOffer),
    Selection(zwp_primary_selection_device_v1::Selection),
    Offer(zwp_primary_selection_offer_v1::Offer),
    Send(zwp_primary_selection_source_v1::Send),
    Cancelled(zwp_primary_selection_source_v1::Cancelled),
}

macro_rules! event_formatter {
    ($ty:ty, $variant:ident, $interface:expr) => {
        impl From<$ty> for Event {
            fn from(e: $ty) -> Self {
                Event::$variant(e)
            }
        }

        impl EventFormatter for $ty {
            fn id(&self) -> ObjectId {
                self.self_id.into()
            }

            fn interface(&self) -> Interface {
                $interface
            }
        }
    };
}

event_formatter!(
    zwp_primary_selection_device_v1::DataOffer,
    DataOffer,
    ZWP_PRIMARY_SELECTION_DEVICE_V1
);
event_formatter!(
    zwp_primary_selection_device_v1::Selection,
    Selection,
    ZWP_PRIMARY_SELECTION_DEVICE_V1
);
event_formatter!(
    zwp_primary_selection_offer_v1::Offer,
    Offer,
    ZWP_PRIMARY_SELECTION_OFFER_V1
);
event_formatter!(
    zwp_primary_selection_source_v1::Send,
    Send,
    ZWP_PRIMARY_SELECTION_SOURCE_V1
);
event_formatter!(
    zwp_primary_selection_source_v1::Cancelled,
    Cancelled,
    ZWP_PRIMARY_SELECTION_SOURCE_V1
);
