use gridbus::{
    GridGraph, ItemId, LoadContext, PartContainer, PartSlot, PlacementError, SideSet,
};
use gridbus_test::{TestCable, TestGrid, TestHost, TestSocket, TestStrap, CABLE, SOCKET, STRAP};

fn live_container(grid: &mut TestGrid, host: &mut TestHost) -> PartContainer {
    let mut container = PartContainer::new();
    container.add_to_world(grid, host);
    container
}

#[test]
fn place_remove_scenario() {
    let mut grid = TestGrid::new();
    let mut host = TestHost::new();
    let ctx = LoadContext::interactive();
    let mut container = live_container(&mut grid, &mut host);

    // A cable goes into the center.
    let placed = container.place(
        Box::new(TestCable::new()),
        PartSlot::Center,
        &mut grid,
        &mut host,
        &ctx,
    );
    assert_eq!(placed, Ok(PartSlot::Center));
    assert_eq!(
        container.part(PartSlot::Center).map(|p| p.item()),
        Some(CABLE)
    );

    // A second cable is rejected and the first stays put.
    let rejected = container.place(
        Box::new(TestCable::new()),
        PartSlot::Center,
        &mut grid,
        &mut host,
        &ctx,
    );
    assert_eq!(
        rejected,
        Err(PlacementError::SlotOccupied {
            slot: PartSlot::Center
        })
    );
    assert_eq!(
        container.part(PartSlot::Center).map(|p| p.item()),
        Some(CABLE)
    );

    // An attachment on the north side connects to the hub.
    let placed = container.place(
        Box::new(TestSocket::new()),
        PartSlot::North,
        &mut grid,
        &mut host,
        &ctx,
    );
    assert_eq!(placed, Ok(PartSlot::North));

    let hub_node = container.part(PartSlot::Center).unwrap().grid_node().unwrap();
    let socket_node = container.part(PartSlot::North).unwrap().grid_node().unwrap();
    assert!(grid.has_edge(hub_node, socket_node));
    assert_eq!(grid.edge_count(), 1);

    // Removing the hub severs the star but leaves the attachment in place.
    assert!(container
        .remove_part(PartSlot::Center, false, &mut grid, &mut host)
        .is_some());
    assert!(container.part(PartSlot::Center).is_none());
    assert_eq!(grid.edge_count(), 0);
    assert_eq!(
        container.part(PartSlot::North).map(|p| p.item()),
        Some(SOCKET)
    );
    assert!(grid.is_active(socket_node));
}

#[test]
fn cables_only_in_the_center() {
    let mut grid = TestGrid::new();
    let mut host = TestHost::new();
    let ctx = LoadContext::interactive();
    let mut container = PartContainer::new();

    let rejected = container.place(
        Box::new(TestCable::new()),
        PartSlot::Up,
        &mut grid,
        &mut host,
        &ctx,
    );
    assert_eq!(rejected, Err(PlacementError::CableOutsideCenter));

    let rejected = container.place(
        Box::new(TestStrap::new()),
        PartSlot::Center,
        &mut grid,
        &mut host,
        &ctx,
    );
    assert_eq!(rejected, Err(PlacementError::AttachmentInCenter));
}

#[test]
fn carrier_compatibility_is_checked_both_ways() {
    let mut grid = TestGrid::new();
    let mut host = TestHost::new();
    let ctx = LoadContext::interactive();

    // A dense-only attachment refuses an ordinary cable.
    let mut container = PartContainer::new();
    container
        .place(
            Box::new(TestCable::new()),
            PartSlot::Center,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    let rejected = container.place(
        Box::new(TestStrap::dense_only()),
        PartSlot::West,
        &mut grid,
        &mut host,
        &ctx,
    );
    assert_eq!(
        rejected,
        Err(PlacementError::Incompatible {
            slot: PartSlot::West
        })
    );

    // A dense cable carries it, but refuses the ordinary strap.
    let mut container = PartContainer::new();
    container
        .place(
            Box::new(TestCable::dense()),
            PartSlot::Center,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    container
        .place(
            Box::new(TestStrap::dense_only()),
            PartSlot::West,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    let rejected = container.place(
        Box::new(TestStrap::new()),
        PartSlot::East,
        &mut grid,
        &mut host,
        &ctx,
    );
    assert_eq!(
        rejected,
        Err(PlacementError::Incompatible {
            slot: PartSlot::East
        })
    );

    // And an incoming hub is vetted by the attachments already present.
    let rejected = container.remove_part(PartSlot::Center, false, &mut grid, &mut host);
    assert!(rejected.is_some());
    let refused_hub = container.place(
        Box::new(TestCable::new()),
        PartSlot::Center,
        &mut grid,
        &mut host,
        &ctx,
    );
    assert_eq!(
        refused_hub,
        Err(PlacementError::Incompatible {
            slot: PartSlot::West
        })
    );
}

#[test]
fn hub_placement_is_atomic() {
    let mut grid = TestGrid::new();
    let mut host = TestHost::new();
    let ctx = LoadContext::interactive();
    let mut container = live_container(&mut grid, &mut host);

    // Two sockets first; they get nodes 1 and 2.
    container
        .place(
            Box::new(TestSocket::new()),
            PartSlot::North,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    container
        .place(
            Box::new(TestSocket::new()),
            PartSlot::South,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    assert_eq!(grid.edge_count(), 0);

    let south_node = container.part(PartSlot::South).unwrap().grid_node().unwrap();

    // The hub will get node 3; refuse its edge to the south socket only.
    grid.refuse(gridbus::GridNodeId::from_u64(3), south_node);

    let placed = container.place(
        Box::new(TestCable::new()),
        PartSlot::Center,
        &mut grid,
        &mut host,
        &ctx,
    );
    assert!(matches!(placed, Err(PlacementError::ConnectionFailed(_))));

    // All or nothing: no hub, no edges, and the hub's node is gone again.
    assert!(container.part(PartSlot::Center).is_none());
    assert_eq!(grid.edge_count(), 0);
    assert_eq!(grid.node_count(), 2);
}

#[test]
fn side_placement_rolls_back_alone() {
    let mut grid = TestGrid::new();
    let mut host = TestHost::new();
    let ctx = LoadContext::interactive();
    let mut container = live_container(&mut grid, &mut host);

    container
        .place(
            Box::new(TestCable::new()),
            PartSlot::Center,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    let hub_node = container.part(PartSlot::Center).unwrap().grid_node().unwrap();

    grid.refuse_all();
    let placed = container.place(
        Box::new(TestSocket::new()),
        PartSlot::East,
        &mut grid,
        &mut host,
        &ctx,
    );
    assert!(matches!(placed, Err(PlacementError::ConnectionFailed(_))));

    assert!(container.part(PartSlot::East).is_none());
    assert_eq!(
        container.part(PartSlot::Center).map(|p| p.item()),
        Some(CABLE)
    );
    assert!(grid.is_active(hub_node));
    assert_eq!(grid.node_count(), 1);
}

#[test]
fn cleanup_fires_when_a_live_container_empties() {
    let mut grid = TestGrid::new();
    let mut host = TestHost::new();
    let ctx = LoadContext::interactive();
    let mut container = live_container(&mut grid, &mut host);

    container
        .place(
            Box::new(TestStrap::new()),
            PartSlot::Up,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    assert_eq!(host.cleanups, 0);

    container.remove_part(PartSlot::Up, false, &mut grid, &mut host);
    assert!(container.is_empty());
    assert_eq!(host.cleanups, 1);
}

#[test]
fn facades_drop_when_the_hub_goes_away() {
    let mut grid = TestGrid::new();
    let mut host = TestHost::new();
    let ctx = LoadContext::interactive();
    let mut container = live_container(&mut grid, &mut host);

    container
        .place(
            Box::new(TestCable::new()),
            PartSlot::Center,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    let facade_item = ItemId(77);
    assert!(container.set_facade(
        PartSlot::West,
        gridbus::Facade::new(facade_item, false),
        &mut host
    ));

    container.remove_part(PartSlot::Center, false, &mut grid, &mut host);

    assert!(container.facade(PartSlot::West).is_none());
    assert_eq!(host.drops, vec![facade_item]);
}

#[test]
fn connectable_sides_exclude_occupied_and_blocked() {
    let mut grid = TestGrid::new();
    let mut host = TestHost::new();
    let ctx = LoadContext::interactive();
    let mut container = live_container(&mut grid, &mut host);

    container
        .place(
            Box::new(TestCable::new()),
            PartSlot::Center,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    container
        .place(
            Box::new(TestSocket::new()),
            PartSlot::East,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    host.blocked.insert(PartSlot::West);

    let mut expected = SideSet::all();
    expected.remove(PartSlot::East);
    expected.remove(PartSlot::West);
    assert_eq!(container.connectable_sides(&host), expected);

    let updates_before = grid.state_updates;
    container.update_connections(&mut grid, &host);
    assert!(grid.state_updates > updates_before);
}

#[test]
fn bulk_installs_stay_quiet() {
    let mut grid = TestGrid::new();
    let mut host = TestHost::new();
    let ctx = LoadContext::interactive();
    let mut container = PartContainer::new();

    // Slots filled before the container joins the world.
    container
        .place(
            Box::new(TestCable::new()),
            PartSlot::Center,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    container
        .place(
            Box::new(TestSocket::new()),
            PartSlot::North,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    assert_eq!(host.neighbor_notifies, 0);

    // The bulk install runs under a loading context: the socket holds its
    // announcement, and the hub still picks up its star.
    container.add_to_world(&mut grid, &mut host);
    assert_eq!(host.neighbor_notifies, 0);
    assert_eq!(grid.edge_count(), 1);

    // Interactive placement announces.
    container.remove_part(PartSlot::North, false, &mut grid, &mut host);
    container
        .place(
            Box::new(TestSocket::new()),
            PartSlot::North,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    assert_eq!(host.neighbor_notifies, 1);
}

#[test]
fn rotation_cycles_side_parts() {
    let mut grid = TestGrid::new();
    let mut host = TestHost::new();
    let ctx = LoadContext::interactive();
    let mut container = PartContainer::new();

    container
        .place(
            Box::new(TestStrap::new()),
            PartSlot::North,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    container
        .place(
            Box::new(TestStrap::new()),
            PartSlot::Up,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();

    container.rotate_left();

    assert!(container.part(PartSlot::North).is_none());
    assert_eq!(
        container.part(PartSlot::East).map(|p| p.item()),
        Some(STRAP)
    );
    assert_eq!(container.part(PartSlot::Up).map(|p| p.item()), Some(STRAP));
}

#[test]
fn drops_follow_slot_order() {
    let mut grid = TestGrid::new();
    let mut host = TestHost::new();
    let ctx = LoadContext::interactive();
    let mut container = live_container(&mut grid, &mut host);

    container
        .place(
            Box::new(TestCable::new()),
            PartSlot::Center,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    container
        .place(
            Box::new(TestSocket::new()),
            PartSlot::Down,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();
    let facade_item = ItemId(50);
    container.set_facade(PartSlot::East, gridbus::Facade::new(facade_item, false), &mut host);

    let mut drops = Vec::new();
    container.drops(&mut drops);
    assert_eq!(
        drops,
        vec![CABLE, SOCKET, gridbus_test::SOCKET_MODULE, facade_item]
    );

    let mut extra = Vec::new();
    container.extra_drops(&mut extra);
    assert_eq!(extra, vec![gridbus_test::SOCKET_MODULE]);
}
