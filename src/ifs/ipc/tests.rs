use {
    super::*,
    crate::{
        ifs::ipc::zwp_primary_selection_device_manager_v1::ZwpPrimarySelectionDeviceManagerV1,
        state::State,
        wire::{
            Event, WlSeatId, ZwpPrimarySelectionDeviceManagerV1Id, ZwpPrimarySelectionDeviceV1Id,
            ZwpPrimarySelectionSourceV1Id,
        },
    },
    uapi::c,
};

fn connect(state: &Rc<State>) -> (Rc<Client>, Rc<ZwpPrimarySelectionDeviceManagerV1>) {
    let client = state.clients.connect(state);
    let mgr = state
        .zwp_primary_selection_device_manager
        .bind_(
            ZwpPrimarySelectionDeviceManagerV1Id::from_raw(2),
            &client,
            1,
        )
        .unwrap();
    (client, mgr)
}

fn get_device(
    mgr: &ZwpPrimarySelectionDeviceManagerV1,
    id: u32,
) -> Rc<ZwpPrimarySelectionDeviceV1> {
    mgr.get_device(
        ZwpPrimarySelectionDeviceV1Id::from_raw(id),
        WlSeatId::from_raw(1),
    )
    .unwrap()
}

fn create_source(
    mgr: &ZwpPrimarySelectionDeviceManagerV1,
    id: u32,
) -> Rc<ZwpPrimarySelectionSourceV1> {
    mgr.create_source(ZwpPrimarySelectionSourceV1Id::from_raw(id))
        .unwrap()
}

fn mime_offers(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Offer(o) => Some(o.mime_type.clone()),
            _ => None,
        })
        .collect()
}

fn count_data_offers(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, Event::DataOffer(_)))
        .count()
}

fn count_cancelled(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, Event::Cancelled(_)))
        .count()
}

#[test]
fn fan_out_creates_one_offer_per_device() {
    let state = State::new();
    let (client_a, mgr_a) = connect(&state);
    let (client_b, mgr_b) = connect(&state);
    let dev_a = get_device(&mgr_a, 3);
    let dev_b = get_device(&mgr_b, 3);
    let src = create_source(&mgr_a, 4);
    src.offer("text/plain");
    src.offer("text/html");
    dev_a.set_selection(src.id, 1).unwrap();

    assert!(state.selection.is_current(&src));
    assert_eq!(src.data.offers.len(), 2);

    for (client, dev) in [(&client_a, &dev_a), (&client_b, &dev_b)] {
        let events = client.take_events();
        assert_eq!(count_data_offers(&events), 1);
        assert_eq!(mime_offers(&events), ["text/plain", "text/html"]);
        let introduced = match &events[0] {
            Event::DataOffer(e) => {
                assert_eq!(e.self_id, dev.id);
                e.offer
            }
            e => panic!("expected data_offer first, got {:?}", e),
        };
        match events.last().unwrap() {
            Event::Selection(e) => assert_eq!(e.id, introduced),
            e => panic!("expected selection last, got {:?}", e),
        }
        assert!(introduced.raw() >= crate::object::MIN_SERVER_ID);
    }
}

#[test]
fn formats_are_announced_in_declaration_order_with_duplicates() {
    let state = State::new();
    let (client, mgr) = connect(&state);
    get_device(&mgr, 3);
    let src = create_source(&mgr, 4);
    src.offer("text/plain");
    src.offer("TEXT");
    src.offer("text/plain");
    state.selection.set_selection(Some(src.clone()));

    let events = client.take_events();
    assert_eq!(mime_offers(&events), ["text/plain", "TEXT", "text/plain"]);
}

#[test]
fn replacing_the_selection_cancels_the_previous_source() {
    let state = State::new();
    let (client_a, mgr_a) = connect(&state);
    let (client_b, mgr_b) = connect(&state);
    let dev_a = get_device(&mgr_a, 3);
    let dev_b = get_device(&mgr_b, 3);
    let s1 = create_source(&mgr_a, 4);
    s1.offer("text/plain");
    dev_a.set_selection(s1.id, 1).unwrap();
    client_a.take_events();
    client_b.take_events();
    let old_offer = dev_b.data.selection.get().unwrap();

    let s2 = create_source(&mgr_a, 5);
    s2.offer("text/html");
    dev_a.set_selection(s2.id, 2).unwrap();

    assert!(state.selection.is_current(&s2));
    assert!(s1.data.offers.is_empty());
    assert!(old_offer.data.source.get().is_none());

    let events_a = client_a.take_events();
    assert_eq!(count_cancelled(&events_a), 1);
    assert_eq!(count_data_offers(&events_a), 1);
    let events_b = client_b.take_events();
    assert_eq!(count_data_offers(&events_b), 1);
    assert_eq!(mime_offers(&events_b), ["text/html"]);
}

#[test]
fn receive_forwards_to_the_source() {
    let state = State::new();
    let (client_a, mgr_a) = connect(&state);
    let (_client_b, mgr_b) = connect(&state);
    let dev_a = get_device(&mgr_a, 3);
    let dev_b = get_device(&mgr_b, 3);
    let src = create_source(&mgr_a, 4);
    src.offer("text/plain");
    dev_a.set_selection(src.id, 1).unwrap();
    client_a.take_events();

    let offer = dev_b.data.selection.get().unwrap();
    let (_read, write) = uapi::pipe2(c::O_CLOEXEC).unwrap();
    let fd = Rc::new(write);
    offer.receive("text/plain", fd.clone());

    let events = client_a.take_events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::Send(e) => {
            assert_eq!(e.self_id, src.id);
            assert_eq!(e.mime_type, "text/plain");
            assert!(Rc::ptr_eq(&e.fd, &fd));
        }
        e => panic!("expected send, got {:?}", e),
    }
}

#[test]
fn late_receive_is_a_noop() {
    let state = State::new();
    let (client_a, mgr_a) = connect(&state);
    let (_client_b, mgr_b) = connect(&state);
    let dev_a = get_device(&mgr_a, 3);
    let dev_b = get_device(&mgr_b, 3);
    let s1 = create_source(&mgr_a, 4);
    s1.offer("text/plain");
    dev_a.set_selection(s1.id, 1).unwrap();
    let offer = dev_b.data.selection.get().unwrap();
    let s2 = create_source(&mgr_a, 5);
    dev_a.set_selection(s2.id, 2).unwrap();
    client_a.take_events();

    let (_read, write) = uapi::pipe2(c::O_CLOEXEC).unwrap();
    offer.receive("text/plain", Rc::new(write));

    assert!(client_a.take_events().is_empty());
}

#[test]
fn clearing_the_selection_cancels_without_new_offers() {
    let state = State::new();
    let (client_a, mgr_a) = connect(&state);
    let (client_b, mgr_b) = connect(&state);
    let dev_a = get_device(&mgr_a, 3);
    get_device(&mgr_b, 3);
    let src = create_source(&mgr_a, 4);
    dev_a.set_selection(src.id, 1).unwrap();
    client_a.take_events();
    client_b.take_events();

    dev_a
        .set_selection(ZwpPrimarySelectionSourceV1Id::NONE, 2)
        .unwrap();

    assert!(state.selection.current().is_none());
    let events_a = client_a.take_events();
    assert_eq!(count_cancelled(&events_a), 1);
    assert_eq!(count_data_offers(&events_a), 0);
    assert!(client_b.take_events().is_empty());

    // Clearing an already empty selection does nothing.
    dev_a
        .set_selection(ZwpPrimarySelectionSourceV1Id::NONE, 3)
        .unwrap();
    assert!(client_a.take_events().is_empty());
}

#[test]
fn setting_the_same_source_again_is_a_noop() {
    let state = State::new();
    let (client, mgr) = connect(&state);
    let dev = get_device(&mgr, 3);
    let src = create_source(&mgr, 4);
    dev.set_selection(src.id, 1).unwrap();
    client.take_events();

    dev.set_selection(src.id, 2).unwrap();

    assert!(state.selection.is_current(&src));
    assert!(client.take_events().is_empty());
}

#[test]
fn destroyed_devices_receive_no_offers() {
    let state = State::new();
    let (client_a, mgr_a) = connect(&state);
    let (client_b, mgr_b) = connect(&state);
    let dev_a = get_device(&mgr_a, 3);
    let dev_b = get_device(&mgr_b, 3);
    assert_eq!(state.selection.num_devices(), 2);

    dev_b.destroy().unwrap();
    assert_eq!(state.selection.num_devices(), 1);

    let src = create_source(&mgr_a, 4);
    dev_a.set_selection(src.id, 1).unwrap();

    assert_eq!(count_data_offers(&client_a.take_events()), 1);
    assert!(client_b.take_events().is_empty());
    assert_eq!(src.data.offers.len(), 1);
}

#[test]
fn device_destroy_with_no_selection_has_no_side_effects() {
    let state = State::new();
    let (_client, mgr) = connect(&state);
    let dev = get_device(&mgr, 3);
    dev.destroy().unwrap();
    assert_eq!(state.selection.num_devices(), 0);
    assert!(state.selection.current().is_none());
}

#[test]
fn source_destroy_clears_the_selection_only_if_current() {
    let state = State::new();
    let (client, mgr) = connect(&state);
    let dev = get_device(&mgr, 3);
    let s1 = create_source(&mgr, 4);
    dev.set_selection(s1.id, 1).unwrap();
    client.take_events();

    // Destroying an uninstalled source leaves the selection alone.
    let s2 = create_source(&mgr, 5);
    s2.destroy().unwrap();
    assert!(state.selection.is_current(&s1));
    assert!(client.take_events().is_empty());

    s1.destroy().unwrap();
    assert!(state.selection.current().is_none());
    assert_eq!(count_cancelled(&client.take_events()), 1);
}

#[test]
fn wrong_kind_references_are_rejected_without_state_changes() {
    let state = State::new();
    let (_client, mgr) = connect(&state);
    let dev = get_device(&mgr, 3);

    // Id 3 names the device, not a source.
    let res = dev.set_selection(ZwpPrimarySelectionSourceV1Id::from_raw(3), 1);
    assert!(res.is_err());
    assert!(state.selection.current().is_none());

    let res = dev.set_selection(ZwpPrimarySelectionSourceV1Id::from_raw(99), 2);
    assert!(res.is_err());
    assert!(state.selection.current().is_none());
}

#[test]
fn offer_destroy_unregisters_from_the_source() {
    let state = State::new();
    let (_client_a, mgr_a) = connect(&state);
    let (client_b, mgr_b) = connect(&state);
    let dev_a = get_device(&mgr_a, 3);
    let dev_b = get_device(&mgr_b, 3);
    let src = create_source(&mgr_a, 4);
    dev_a.set_selection(src.id, 1).unwrap();
    assert_eq!(src.data.offers.len(), 2);

    let offer = dev_b.data.selection.get().unwrap();
    offer.destroy().unwrap();
    assert_eq!(src.data.offers.len(), 1);
    assert!(dev_b.data.selection.get().is_none());

    // A second destroy is rejected but must not corrupt anything.
    assert!(offer.destroy().is_err());
    assert_eq!(src.data.offers.len(), 1);
    assert!(
        client_b
            .take_events()
            .iter()
            .all(|e| !matches!(e, Event::Cancelled(_)))
    );
}

#[test]
fn offer_destroy_after_cancellation_is_safe() {
    let state = State::new();
    let (_client_a, mgr_a) = connect(&state);
    let (_client_b, mgr_b) = connect(&state);
    let dev_a = get_device(&mgr_a, 3);
    let dev_b = get_device(&mgr_b, 3);
    let s1 = create_source(&mgr_a, 4);
    dev_a.set_selection(s1.id, 1).unwrap();
    let offer = dev_b.data.selection.get().unwrap();
    dev_a
        .set_selection(ZwpPrimarySelectionSourceV1Id::NONE, 2)
        .unwrap();

    assert!(offer.data.source.get().is_none());
    offer.destroy().unwrap();
}

#[test]
fn late_format_declarations_do_not_reach_existing_offers() {
    let state = State::new();
    let (client, mgr) = connect(&state);
    let dev = get_device(&mgr, 3);
    let src = create_source(&mgr, 4);
    src.offer("text/plain");
    dev.set_selection(src.id, 1).unwrap();
    client.take_events();

    src.offer("text/html");

    assert!(client.take_events().is_empty());
    assert_eq!(src.data.mime_types.borrow().len(), 2);
}

#[test]
fn disconnect_of_the_source_owner_breaks_all_loops() {
    let state = State::new();
    let (client_a, mgr_a) = connect(&state);
    let (_client_b, mgr_b) = connect(&state);
    let dev_a = get_device(&mgr_a, 3);
    let dev_b = get_device(&mgr_b, 3);
    let src = create_source(&mgr_a, 4);
    dev_a.set_selection(src.id, 1).unwrap();
    let offer_b = dev_b.data.selection.get().unwrap();

    state.clients.kill(client_a.id);

    assert!(state.selection.current().is_none());
    assert_eq!(state.selection.num_devices(), 1);
    assert!(offer_b.data.source.get().is_none());
}

#[test]
fn disconnect_of_a_receiver_unregisters_its_offer() {
    let state = State::new();
    let (_client_a, mgr_a) = connect(&state);
    let (client_b, mgr_b) = connect(&state);
    let dev_a = get_device(&mgr_a, 3);
    get_device(&mgr_b, 3);
    let src = create_source(&mgr_a, 4);
    dev_a.set_selection(src.id, 1).unwrap();
    assert_eq!(src.data.offers.len(), 2);

    state.clients.kill(client_b.id);

    assert_eq!(src.data.offers.len(), 1);
    assert_eq!(state.selection.num_devices(), 1);
    assert!(state.selection.is_current(&src));
}

#[test]
fn manager_destroy_does_not_cascade() {
    let state = State::new();
    let (client, mgr) = connect(&state);
    let dev = get_device(&mgr, 3);
    let src = create_source(&mgr, 4);
    mgr.destroy().unwrap();

    src.offer("text/plain");
    dev.set_selection(src.id, 1).unwrap();
    assert!(state.selection.is_current(&src));
    assert_eq!(count_data_offers(&client.take_events()), 1);
}

#[test]
fn serials_are_recorded() {
    let state = State::new();
    let (client, mgr) = connect(&state);
    let dev = get_device(&mgr, 3);
    let src = create_source(&mgr, 4);
    dev.set_selection(src.id, 42).unwrap();
    assert_eq!(client.last_serial.get(), 42);
}

#[test]
fn duplicate_object_ids_are_rejected_without_state_changes() {
    let state = State::new();
    let (client, mgr) = connect(&state);
    let dev = get_device(&mgr, 3);
    let s1 = create_source(&mgr, 4);

    // Id 4 is taken. The rejected object must not replace the original in
    // either lookup table.
    assert!(
        mgr.create_source(ZwpPrimarySelectionSourceV1Id::from_raw(4))
            .is_err()
    );

    let looked_up = client
        .lookup(ZwpPrimarySelectionSourceV1Id::from_raw(4))
        .unwrap();
    assert!(Rc::ptr_eq(&looked_up, &s1));
    let generic = client.objects.get(s1.id.into()).unwrap();
    assert_eq!(
        Rc::as_ptr(&generic) as *const (),
        Rc::as_ptr(&s1) as *const ()
    );

    // The original source is still fully functional.
    dev.set_selection(s1.id, 1).unwrap();
    assert!(state.selection.is_current(&s1));
}

#[test]
fn state_teardown_disconnects_everything() {
    let state = State::new();
    let (_client_a, mgr_a) = connect(&state);
    let dev = get_device(&mgr_a, 3);
    let src = create_source(&mgr_a, 4);
    dev.set_selection(src.id, 1).unwrap();

    state.clear();

    assert!(state.selection.current().is_none());
    assert_eq!(state.selection.num_devices(), 0);
}
