use {
    crate::{
        client::{Client, ClientError},
        ifs::ipc::{SourceData, add_source_mime_type, break_source_loops},
        object::{Interface, Object, ObjectId},
        wire::{
            ZWP_PRIMARY_SELECTION_SOURCE_V1, ZwpPrimarySelectionSourceV1Id,
            zwp_primary_selection_source_v1::{Cancelled, Send},
        },
    },
    std::rc::Rc,
    thiserror::Error,
    uapi::OwnedFd,
};

pub struct ZwpPrimarySelectionSourceV1 {
    pub id: ZwpPrimarySelectionSourceV1Id,
    pub data: SourceData,
}

impl ZwpPrimarySelectionSourceV1 {
    pub fn new(id: ZwpPrimarySelectionSourceV1Id, client: &Rc<Client>) -> Self {
        Self {
            id,
            data: SourceData::new(client),
        }
    }

    pub fn send_cancelled(&self) {
        self.data.client.event(Cancelled { self_id: self.id });
    }

    pub fn send_send(&self, mime_type: &str, fd: Rc<OwnedFd>) {
        self.data.client.event(Send {
            self_id: self.id,
            mime_type: mime_type.to_string(),
            fd,
        })
    }

    /// Declares a mime type the source can provide. The declared list is
    /// ordered and may contain duplicates.
    pub fn offer(&self, mime_type: &str) {
        add_source_mime_type(self, mime_type);
    }

    pub fn destroy(&self) -> Result<(), ZwpPrimarySelectionSourceV1Error> {
        let broker = &self.data.client.state.selection;
        if broker.is_current(self) {
            broker.set_selection(None);
        }
        self.data.client.remove_obj(self)?;
        Ok(())
    }
}

impl Object for ZwpPrimarySelectionSourceV1 {
    fn id(&self) -> ObjectId {
        self.id.into()
    }

    fn interface(&self) -> Interface {
        ZWP_PRIMARY_SELECTION_SOURCE_V1
    }

    fn break_loops(&self) {
        break_source_loops(self);
    }
}

dedicated_add_obj!(
    ZwpPrimarySelectionSourceV1,
    ZwpPrimarySelectionSourceV1Id,
    zwp_primary_selection_source,
    crate::wire::ZWP_PRIMARY_SELECTION_SOURCE_V1
);

#[derive(Debug, Error)]
pub enum ZwpPrimarySelectionSourceV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(ZwpPrimarySelectionSourceV1Error, ClientError);
