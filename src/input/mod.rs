use bevy::prelude::*;
use crate::shared::*;

/// Maps keyboard and mouse state to `FishingInput` once per frame.
///
/// Needs `ButtonInput<KeyCode>` and `ButtonInput<MouseButton>`, which Bevy's
/// own input plugin provides in a windowed app.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .init_resource::<FishingInput>()
            .add_systems(PreUpdate, reset_and_read_input);
    }
}

/// The single point where hardware input becomes fishing actions.
pub fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    bindings: Res<KeyBindings>,
    mut input: ResMut<FishingInput>,
) {
    *input = FishingInput::default();

    input.cast_pressed = keys.just_pressed(bindings.cast) || mouse.just_pressed(MouseButton::Left);
    input.reel_held = keys.pressed(bindings.reel) || mouse.pressed(MouseButton::Left);
    input.cancel_pressed = keys.just_pressed(bindings.cancel);
}
