use gridbus::{LoadContext, PartContainer, PartSlot};
use gridbus_test::{TestCable, TestGrid, TestHost, TestSocket};

fn container_with_socket(grid: &mut TestGrid, host: &mut TestHost) -> PartContainer {
    let ctx = LoadContext::interactive();
    let mut container = PartContainer::new();
    container
        .place(Box::new(TestCable::new()), PartSlot::Center, grid, host, &ctx)
        .unwrap();
    container
        .place(Box::new(TestSocket::new()), PartSlot::South, grid, host, &ctx)
        .unwrap();
    container
}

#[test]
fn redstone_is_queried_lazily_and_reset_by_neighbors() {
    let mut grid = TestGrid::new();
    let mut host = TestHost::new();
    let mut container = container_with_socket(&mut grid, &mut host);

    host.power = 12;
    assert!(container.has_redstone(&host));

    // The decided state sticks even when the neighbor power changes...
    host.power = 0;
    assert!(container.has_redstone(&host));

    // ...until a neighbor change resets it.
    container.neighbor_changed(&mut grid, &mut host);
    assert!(!container.has_redstone(&host));
}

#[test]
fn light_level_is_the_maximum_over_parts() {
    let mut grid = TestGrid::new();
    let mut host = TestHost::new();

    let empty = PartContainer::new();
    assert_eq!(empty.light_level(), 0);

    let container = container_with_socket(&mut grid, &mut host);
    assert_eq!(container.light_level(), 7);
}

#[test]
fn redstone_surface_delegates_to_the_side_part() {
    let mut grid = TestGrid::new();
    let mut host = TestHost::new();
    let container = container_with_socket(&mut grid, &mut host);

    assert!(container.can_connect_redstone(PartSlot::South));
    assert_eq!(container.strong_power(PartSlot::South), 2);
    assert_eq!(container.weak_power(PartSlot::South), 4);

    // Unoccupied sides answer with the defaults.
    assert!(!container.can_connect_redstone(PartSlot::North));
    assert_eq!(container.strong_power(PartSlot::North), 0);
    assert_eq!(container.weak_power(PartSlot::North), 0);
}

#[test]
fn grid_node_lookup_prefers_the_side_part() {
    let mut grid = TestGrid::new();
    let mut host = TestHost::new();
    let mut container = PartContainer::new();
    container.add_to_world(&mut grid, &mut host);

    let ctx = LoadContext::interactive();
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
            PartSlot::South,
            &mut grid,
            &mut host,
            &ctx,
        )
        .unwrap();

    let hub_node = container.part(PartSlot::Center).unwrap().grid_node();
    let socket_node = container.part(PartSlot::South).unwrap().grid_node();

    // A neighbor beyond the socket reaches the socket's node; everywhere
    // else falls through to the hub.
    assert_eq!(container.grid_node(PartSlot::South), socket_node);
    assert_eq!(container.grid_node(PartSlot::North), hub_node);
    assert_eq!(container.grid_node(PartSlot::Center), hub_node);
}
