// ---------------------------------------------------------------------------
// App extension for registering Saveable resources
// ---------------------------------------------------------------------------

use bevy::prelude::*;
use simulation::{Saveable, SaveableRegistry};

/// Extension trait on `App` for one-line saveable registration by host
/// plugins layered on top of the simulation (scenario goals, company
/// bookkeeping and the like).
///
/// # Example
///
/// ```ignore
/// use save::SaveableAppExt;
///
/// fn build(&self, app: &mut App) {
///     app.init_resource::<ScenarioGoals>()
///        .register_saveable::<ScenarioGoals>();
/// }
/// ```
pub trait SaveableAppExt {
    fn register_saveable<T: Saveable>(&mut self) -> &mut Self;
}

impl SaveableAppExt for App {
    fn register_saveable<T: Saveable>(&mut self) -> &mut Self {
        self.init_resource::<SaveableRegistry>();
        self.world_mut()
            .resource_mut::<SaveableRegistry>()
            .register::<T>();
        self
    }
}
