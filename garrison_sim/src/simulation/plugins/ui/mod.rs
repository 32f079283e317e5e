// garrison_sim/src/simulation/plugins/ui/mod.rs

//! The tower panel: "Produce Units" and "Upgrade Tower" buttons plus a
//! one-line status of the last production run.

use crate::prelude::*;

const NORMAL_BUTTON: Color = Color::srgb(0.15, 0.15, 0.15);
const HOVERED_BUTTON: Color = Color::srgb(0.25, 0.25, 0.25);
const PRESSED_BUTTON: Color = Color::srgb(0.35, 0.75, 0.35);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    ProduceUnits,
    UpgradeTower,
}

impl ButtonAction {
    fn label(&self) -> &'static str {
        match self {
            ButtonAction::ProduceUnits => "Produce Units",
            ButtonAction::UpgradeTower => "Upgrade Tower",
        }
    }
}

/// The tower the panel's buttons act on.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SelectedTower(pub Option<Entity>);

#[derive(Component)]
pub struct ProductionStatusText;

pub struct ProductionUiPlugin;

impl Plugin for ProductionUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectedTower>()
            .add_systems(
                OnEnter(AppState::Running),
                (select_default_tower, setup_production_panel),
            )
            .add_systems(
                Update,
                (
                    (button_action_system, button_color_system).in_set(ProductionSet::Input),
                    update_status_text.in_set(ProductionSet::Report),
                ),
            );
    }
}

/// Selects the first tower of the scene unless one is already selected.
pub fn select_default_tower(
    mut selected: ResMut<SelectedTower>,
    towers: Query<(Entity, &Name), With<Tower>>,
) {
    if selected.0.is_some() {
        return;
    }
    if let Some((entity, name)) = towers.iter().min_by_key(|(entity, _)| *entity) {
        info!("Panel controls tower '{}'", name);
        selected.0 = Some(entity);
    } else {
        warn!("No tower in the scene; the production panel has nothing to control.");
    }
}

fn setup_production_panel(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            bottom: Val::Px(12.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(|panel| {
            panel
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|row| {
                    for action in [ButtonAction::ProduceUnits, ButtonAction::UpgradeTower] {
                        row.spawn((
                            Button,
                            Node {
                                width: Val::Px(170.0),
                                height: Val::Px(48.0),
                                // center the label
                                justify_content: JustifyContent::Center,
                                align_items: AlignItems::Center,
                                ..default()
                            },
                            BackgroundColor(NORMAL_BUTTON),
                            action,
                        ))
                        .with_children(|button| {
                            button.spawn((
                                Text::new(action.label()),
                                TextFont {
                                    font_size: 20.0,
                                    ..default()
                                },
                                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                            ));
                        });
                    }
                });

            panel.spawn((
                Text::new("Ready."),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.95, 0.8)),
                ProductionStatusText,
            ));
        });
}

/// Turns a button press into the matching request for the selected tower.
pub fn button_action_system(
    interactions: Query<(&Interaction, &ButtonAction), Changed<Interaction>>,
    selected: Res<SelectedTower>,
    mut produce: EventWriter<ProduceUnitsRequested>,
    mut upgrade: EventWriter<UpgradeTowerRequested>,
) {
    for (interaction, action) in &interactions {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Some(tower) = selected.0 else {
            warn!("'{}' pressed with no tower selected.", action.label());
            continue;
        };
        debug!("'{}' pressed for {:?}", action.label(), tower);
        match action {
            ButtonAction::ProduceUnits => {
                produce.write(ProduceUnitsRequested { tower });
            }
            ButtonAction::UpgradeTower => {
                upgrade.write(UpgradeTowerRequested { tower });
            }
        }
    }
}

fn button_color_system(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<ButtonAction>),
    >,
) {
    for (interaction, mut color) in &mut buttons {
        *color = match *interaction {
            Interaction::Pressed => PRESSED_BUTTON.into(),
            Interaction::Hovered => HOVERED_BUTTON.into(),
            Interaction::None => NORMAL_BUTTON.into(),
        };
    }
}

/// One line describing a finished run.
pub fn status_line(event: &ProductionFinished) -> String {
    match &event.result {
        Err(e) => format!("No units produced: {}.", e),
        Ok(report) => match &report.halted {
            None => format!("Units produced: {}.", report.placements.len()),
            Some(halt) => format!(
                "Units produced: {}. Stopped early: {}.",
                report.placements.len(),
                halt
            ),
        },
    }
}

fn update_status_text(
    mut finished: EventReader<ProductionFinished>,
    mut texts: Query<&mut Text, With<ProductionStatusText>>,
) {
    let Some(last) = finished.read().last() else {
        return;
    };
    let line = status_line(last);
    for mut text in &mut texts {
        text.0 = line.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;
    use garrison_core::production::{Placement, ProductionReport};
    use garrison_core::types::{ColliderHandle, RoadCandidate};
    use nalgebra::Vector3;

    fn running_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .add_plugins(crate::simulation::core::simulation_setup::SimulationSetupPlugin)
            .init_resource::<SelectedTower>()
            .add_systems(Update, button_action_system.in_set(ProductionSet::Input));
        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Running);
        app.update();
        app
    }

    fn produce_requests(app: &App) -> Vec<ProduceUnitsRequested> {
        app.world()
            .resource::<Events<ProduceUnitsRequested>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }

    fn upgrade_requests(app: &App) -> Vec<UpgradeTowerRequested> {
        app.world()
            .resource::<Events<UpgradeTowerRequested>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }

    #[test]
    fn test_produce_button_requests_units_for_selected_tower() {
        let mut app = running_app();
        let tower = app.world_mut().spawn((Name::new("keep"), Tower)).id();
        app.world_mut().resource_mut::<SelectedTower>().0 = Some(tower);

        app.world_mut()
            .spawn((Interaction::Pressed, ButtonAction::ProduceUnits));
        app.update();

        assert_eq!(produce_requests(&app), vec![ProduceUnitsRequested { tower }]);
        assert!(upgrade_requests(&app).is_empty());
    }

    #[test]
    fn test_upgrade_button_requests_upgrade() {
        let mut app = running_app();
        let tower = app.world_mut().spawn((Name::new("keep"), Tower)).id();
        app.world_mut().resource_mut::<SelectedTower>().0 = Some(tower);

        app.world_mut()
            .spawn((Interaction::Pressed, ButtonAction::UpgradeTower));
        app.update();

        assert_eq!(upgrade_requests(&app), vec![UpgradeTowerRequested { tower }]);
        assert!(produce_requests(&app).is_empty());
    }

    #[test]
    fn test_hover_does_not_trigger() {
        let mut app = running_app();
        let tower = app.world_mut().spawn((Name::new("keep"), Tower)).id();
        app.world_mut().resource_mut::<SelectedTower>().0 = Some(tower);

        app.world_mut()
            .spawn((Interaction::Hovered, ButtonAction::ProduceUnits));
        app.update();

        assert!(produce_requests(&app).is_empty());
    }

    #[test]
    fn test_press_without_selection_sends_nothing() {
        let mut app = running_app();
        app.world_mut()
            .spawn((Interaction::Pressed, ButtonAction::ProduceUnits));
        app.update();

        assert!(produce_requests(&app).is_empty());
    }

    #[test]
    fn test_status_line_reports_outcomes() {
        let tower = Entity::PLACEHOLDER;
        let report = ProductionReport {
            road: RoadCandidate {
                handle: ColliderHandle(0),
                surface: Vector3::new(2.0, 0.0, 0.0),
                distance: 2.0,
                spawn_base: Vector3::new(2.0, 1.0, 0.0),
            },
            placements: vec![
                Placement {
                    slot: 0,
                    position: Vector3::new(2.0, 1.0, 0.0),
                    candidates_tried: 1,
                },
                Placement {
                    slot: 1,
                    position: Vector3::new(3.0, 1.0, 0.0),
                    candidates_tried: 1,
                },
            ],
            searches: Vec::new(),
            halted: Some(ProductionError::NoValidSpawnPosition { slot: 2 }),
        };

        let partial = ProductionFinished {
            tower,
            result: Ok(report),
        };
        assert_eq!(partial.placed(), 2);
        assert_eq!(
            status_line(&partial),
            "Units produced: 2. Stopped early: no valid spawn position found for unit in slot 2."
        );

        let none = ProductionFinished {
            tower,
            result: Err(ProductionError::NoRoadNearby { radius: 10.0 }),
        };
        assert_eq!(none.placed(), 0);
        assert_eq!(
            status_line(&none),
            "No units produced: no road found within 10 of the producer."
        );
    }
}
