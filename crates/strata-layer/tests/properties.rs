use std::collections::HashSet;

use approx::relative_eq;
use nalgebra::{Translation3, UnitQuaternion, Vector3};
use proptest::prelude::*;
use strata_core::{NavigationOptions, Position, SearchDepth, Transform};
use strata_layer::LayerType;
use strata_surface::Surface;
use strata_test_utils::fixtures::{closed, module_array, standard_builder};
use strata_test_utils::toward;

fn exhaustive_passive() -> NavigationOptions {
    NavigationOptions::new()
        .with_resolve(false, false, true)
        .with_search_depth(SearchDepth::Exhaustive)
}

fn arb_start() -> impl Strategy<Value = Position> {
    (-8.0..8.0f64, -8.0..8.0f64, -20.0..-1.0f64).prop_map(|(x, y, z)| Position::new(x, y, z))
}

fn arb_target() -> impl Strategy<Value = Position> {
    (-6.0..6.0f64, -6.0..6.0f64, 4.0..6.0f64).prop_map(|(x, y, z)| Position::new(x, y, z))
}

fn arb_shift() -> impl Strategy<Value = Transform> {
    (
        -50.0..50.0f64,
        -50.0..50.0f64,
        -50.0..50.0f64,
        -3.0..3.0f64,
        -3.0..3.0f64,
    )
        .prop_map(|(x, y, z, yaw, pitch)| {
            let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw)
                * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), pitch);
            Transform::from_parts(Translation3::new(x, y, z), rotation)
        })
}

proptest! {
    #[test]
    fn hits_are_forward_sorted_and_distinct(start in arb_start(), target in arb_target()) {
        let layer = closed(
            standard_builder(5.0)
                .surface_array(module_array(4, 5.0))
                .build()
                .unwrap(),
        );
        let hits = layer
            .compatible_surfaces(&toward(start, target), &exhaustive_passive())
            .unwrap();

        let mut seen = HashSet::new();
        for hit in &hits {
            prop_assert!(hit.is_valid());
            prop_assert!(hit.path_length() >= 0.0);
            prop_assert!(seen.insert(hit.object.instance_id()));
        }
        for pair in hits.windows(2) {
            prop_assert!(pair[0].path_length() <= pair[1].path_length());
        }
    }

    #[test]
    fn path_limit_is_respected(
        start in arb_start(),
        target in arb_target(),
        limit in 0.0..30.0f64,
    ) {
        let layer = closed(
            standard_builder(5.0)
                .surface_array(module_array(4, 5.0))
                .build()
                .unwrap(),
        );
        let options = exhaustive_passive().with_path_limit(limit);
        let hits = layer.compatible_surfaces(&toward(start, target), &options).unwrap();
        prop_assert!(hits.iter().all(|hit| hit.path_length() <= limit));

        if let Ok(hit) = layer.surface_on_approach(&toward(start, target), &options) {
            prop_assert!(!hit.is_valid() || hit.path_length() <= limit);
        }
    }

    #[test]
    fn unresolved_layer_yields_nothing(start in arb_start(), target in arb_target()) {
        let layer = closed(
            standard_builder(5.0)
                .layer_type(LayerType::Passive)
                .surface_array(module_array(4, 5.0))
                .build()
                .unwrap(),
        );
        let options = NavigationOptions::new()
            .with_resolve(true, true, false)
            .with_search_depth(SearchDepth::Exhaustive);
        prop_assert_eq!(layer.resolves(&options), Ok(false));
        let hits = layer.compatible_surfaces(&toward(start, target), &options).unwrap();
        prop_assert!(hits.is_empty());
    }

    #[test]
    fn shifted_copy_composes_transforms(shift in arb_shift()) {
        let original = standard_builder(5.0)
            .surface_array(module_array(2, 5.0))
            .build()
            .unwrap();
        let copy = original.clone_with_shift(&shift);

        let expected = shift * original.surface_representation().transform();
        prop_assert!(relative_eq!(
            *copy.surface_representation().transform(),
            expected,
            epsilon = 1e-9
        ));

        let before = original.surface_array().unwrap();
        let after = copy.surface_array().unwrap();
        prop_assert_eq!(before.len(), after.len());
        for (old, new) in before.surfaces().zip(after.surfaces()) {
            prop_assert!(relative_eq!(new.center(), shift * old.center(), epsilon = 1e-9));
            prop_assert_ne!(old.instance_id(), new.instance_id());
        }
        prop_assert_eq!(copy.thickness(), original.thickness());
        prop_assert_eq!(copy.layer_type(), original.layer_type());
    }
}
