use animation::AnimationStateMachine;
use devices::InputSampler;

use crate::transform::Transform;
use crate::world::{Scene, World};

/// Everything one avatar carries between ticks
///
/// Created when the scene is set up and owned by the frame driver. Fields are
/// public so asset and device collaborators can feed their parts in.
pub struct Session<W: World = Scene> {
    pub transform: Transform,
    pub input: InputSampler,
    pub animation: AnimationStateMachine,
    pub world: W,
}

impl<W: World> Session<W> {
    pub fn new(
        transform: Transform,
        input: InputSampler,
        animation: AnimationStateMachine,
        world: W,
    ) -> Self {
        Self {
            transform,
            input,
            animation,
            world,
        }
    }
}

impl<W: World + Default> Default for Session<W> {
    fn default() -> Self {
        Self::new(
            Transform::default(),
            InputSampler::default(),
            AnimationStateMachine::default(),
            W::default(),
        )
    }
}
