use proptest::prelude::*;
use skirmish_arena::{AgentPool, SpawnAttrs};
use skirmish_core::{Direction, GroupId, Pos, TickId};
use skirmish_obs::{
    presence_channel, ObsSpec, ObservationBuilder, ViewFrame, ViewShape, WALL_CHANNEL,
};
use skirmish_space::{Grid, SpatialIndex};

fn shape() -> impl Strategy<Value = ViewShape> {
    prop_oneof![Just(ViewShape::Square), Just(ViewShape::Circle)]
}

fn frame() -> impl Strategy<Value = ViewFrame> {
    prop_oneof![Just(ViewFrame::World), Just(ViewFrame::Egocentric)]
}

proptest! {
    #[test]
    fn window_agrees_with_pool(
        agents in prop::collection::vec((0u32..3, 0i32..12, 0i32..10, 0usize..4), 1..40),
        obstacles in prop::collection::vec((0i32..12, 0i32..10), 0..15),
        range in 0u32..5,
        shape in shape(),
        frame in frame(),
    ) {
        let mut grid = Grid::new(12, 10).unwrap();
        for (x, y) in obstacles {
            grid.set_obstacle(Pos::new(x, y)).unwrap();
        }
        let mut pool = AgentPool::new(SpatialIndex::new(grid), 64, 3);
        for (g, x, y, facing) in agents {
            let attrs = SpawnAttrs::full(2.0).facing(Direction::ALL[facing]);
            let _ = pool.spawn(GroupId(g), Pos::new(x, y), attrs);
        }
        let spec = ObsSpec { view_range: range, shape, frame, max_neighbors: None };
        let builder = ObservationBuilder::new(vec![spec; 3]).unwrap();
        let all = builder.build_all(&pool, TickId(0)).unwrap();
        prop_assert_eq!(all.len(), pool.alive_count());

        for (id, obs) in &all {
            let me = pool.get(*id).unwrap();
            let window = builder.spec(me.group).map(skirmish_obs::Window::new).unwrap();
            prop_assert_eq!(obs.window.len(), obs.side * obs.side * obs.channels);

            for i in 0..window.cells() {
                let (row, col) = (i / obs.side, i % obs.side);
                if !window.in_shape(i) {
                    prop_assert!(!obs.is_valid(row, col));
                    continue;
                }
                let (dx, dy) = window.world_offset(i, me.orientation);
                let cell = me.pos.offset(dx, dy);
                prop_assert_eq!(obs.is_valid(row, col), pool.grid().contains(cell));
                prop_assert_eq!(obs.at(row, col, WALL_CHANNEL) == 1.0, pool.grid().is_wall(cell));
                if let Some(other) = pool.index().occupant_at(cell) {
                    let ov = pool.get(other).unwrap();
                    let ch = presence_channel(me.group, ov.group);
                    prop_assert_eq!(obs.at(row, col, ch), 1.0);
                    prop_assert_eq!(obs.at(row, col, ch + 1), ov.hp_fraction());
                }
            }

            for n in &obs.neighbors {
                prop_assert_ne!(n.id, *id);
                let ov = pool.get(n.id).unwrap();
                prop_assert_eq!(n.group, ov.group);
            }
        }
    }
}
