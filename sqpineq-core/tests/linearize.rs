mod common;

use common::{
    l, point, unit_disk, x, FixedViolation, QuadraticLinearization, TwoRowConstraint,
};
use sqpineq::{ConstraintError, NonlinearInequalityGraph, ScalarInequality, VectorValues};

#[test]
fn linearize_preserves_order_and_dual_keys() {
    let mut graph = NonlinearInequalityGraph::new();
    let violations = [0.3, -1.0, 0.0, 2.5, -0.25];
    for (i, v) in violations.iter().enumerate() {
        graph
            .add(FixedViolation::new(x(i as u64), l(10 - i as u64), *v))
            .unwrap();
    }

    let values = point(vec![]);
    let linear = graph.linearize(&values).unwrap();

    assert_eq!(linear.len(), graph.len());
    for (i, ineq) in linear.iter().enumerate() {
        assert_eq!(ineq.dual_key(), l(10 - i as u64));
        assert_eq!(ineq.keys(), &[x(i as u64)]);
        assert_eq!(ineq.jacobian().b(), &[-violations[i]]);
        assert!(!ineq.is_active());
    }
}

#[test]
fn linearize_empty_graph_gives_empty_inequalities() {
    let graph = NonlinearInequalityGraph::new();
    let linear = graph.linearize(&point(vec![])).unwrap();
    assert!(linear.is_empty());
}

#[test]
fn scalar_inequality_linearizes_to_first_order_model() {
    let mut graph = NonlinearInequalityGraph::new();
    graph.add(unit_disk(x(0), l(0))).unwrap();

    let values = point(vec![(x(0), vec![0.5, -2.0])]);
    let linear = graph.linearize(&values).unwrap();
    let ineq = linear.get(0).unwrap();

    // g(x0) = 0.25 + 4 - 1 = 3.25, ∇g = [1, -4]
    assert_eq!(ineq.jacobian().block(x(0)).unwrap(), &[1.0, -4.0]);
    assert!((ineq.jacobian().b()[0] + 3.25).abs() < 1e-12);

    // a·δ - b = ∇gᵀδ + g(x0)
    let delta: VectorValues = [(x(0), vec![0.1, 0.2])].into_iter().collect();
    let expected = 1.0 * 0.1 - 4.0 * 0.2 + 3.25;
    assert!((ineq.error(&delta).unwrap() - expected).abs() < 1e-12);
    assert!((ineq.dot_product_row(&delta).unwrap() - (0.1 - 0.8)).abs() < 1e-12);
}

#[test]
fn scalar_inequality_splits_gradient_per_key() {
    // x0 + 2 y0 + 3 y1 - 4 <= 0
    let c = ScalarInequality::new(
        vec![(x(0), 1), (x(1), 2)],
        l(0),
        |v: &[f64]| v[0] + 2.0 * v[1] + 3.0 * v[2] - 4.0,
        |_v: &[f64], g: &mut [f64]| g.copy_from_slice(&[1.0, 2.0, 3.0]),
    );
    let mut graph = NonlinearInequalityGraph::new();
    graph.add(c).unwrap();

    let values = point(vec![(x(0), vec![1.0]), (x(1), vec![0.0, 1.0])]);
    let linear = graph.linearize(&values).unwrap();
    let jac = linear.get(0).unwrap().jacobian();
    assert_eq!(jac.block(x(0)).unwrap(), &[1.0]);
    assert_eq!(jac.block(x(1)).unwrap(), &[2.0, 3.0]);
    assert_eq!(jac.b(), &[0.0]);
}

#[test]
fn non_jacobian_linearization_is_malformed() {
    let mut graph = NonlinearInequalityGraph::new();
    graph.add(FixedViolation::new(x(0), l(0), -1.0)).unwrap();
    graph
        .add(QuadraticLinearization {
            keys: vec![x(1)],
            dual_key: l(7),
        })
        .unwrap();

    let err = graph.linearize(&point(vec![])).unwrap_err();
    assert_eq!(
        err,
        ConstraintError::MalformedConstraint {
            dual_key: l(7),
            kind: "Hessian",
        }
    );
    assert!(err.to_string().contains("l7"));
}

#[test]
fn multi_row_linearization_is_rejected() {
    let mut graph = NonlinearInequalityGraph::new();
    graph
        .add(TwoRowConstraint {
            keys: vec![x(0)],
            dual_key: l(3),
        })
        .unwrap();

    let err = graph.linearize(&point(vec![])).unwrap_err();
    assert_eq!(
        err,
        ConstraintError::NonScalarConstraint {
            dual_key: l(3),
            rows: 2,
        }
    );
}

#[test]
fn missing_variable_is_reported() {
    let mut graph = NonlinearInequalityGraph::new();
    graph.add(unit_disk(x(4), l(0))).unwrap();
    let err = graph.linearize(&point(vec![])).unwrap_err();
    assert_eq!(err, ConstraintError::MissingVariable { key: x(4) });

    let err = graph.linearize(&point(vec![(x(4), vec![1.0])])).unwrap_err();
    assert_eq!(
        err,
        ConstraintError::DimensionMismatch {
            key: x(4),
            expected: 2,
            actual: 1,
        }
    );
}

#[test]
fn duplicate_dual_keys_are_rejected() {
    let mut graph = NonlinearInequalityGraph::new();
    let first = graph.add(FixedViolation::new(x(0), l(1), 0.0)).unwrap();
    let err = graph.add(FixedViolation::new(x(1), l(1), 0.0)).unwrap_err();

    assert_eq!(err, ConstraintError::DuplicateDualKey(l(1)));
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.index_of(l(1)), Some(first));
    assert_eq!(graph.index_of(l(2)), None);
}

#[test]
fn linear_inequalities_track_active_flags_and_feasibility() {
    let mut graph = NonlinearInequalityGraph::new();
    graph.add(FixedViolation::new(x(0), l(0), -1.0)).unwrap();
    graph.add(FixedViolation::new(x(1), l(1), 0.5)).unwrap();

    let mut linear = graph.linearize(&point(vec![])).unwrap();
    linear.get_mut(1).unwrap().activate();
    assert_eq!(linear.active_dual_keys(), vec![l(1)]);

    // rows: δx0 - 1 <= 0 and δx1 + 0.5 <= 0
    let zero = VectorValues::new();
    assert!(!linear.is_feasible(&zero, 1e-9).unwrap());
    let step: VectorValues = [(x(1), vec![-0.5])].into_iter().collect();
    assert!(linear.is_feasible(&step, 1e-9).unwrap());

    linear.get_mut(1).unwrap().deactivate();
    assert!(linear.active_dual_keys().is_empty());
}

#[test]
fn linear_inequality_rejects_mismatched_delta() {
    let mut graph = NonlinearInequalityGraph::new();
    graph.add(FixedViolation::new(x(0), l(0), 0.0)).unwrap();
    let linear = graph.linearize(&point(vec![])).unwrap();
    let ineq = linear.get(0).unwrap();

    // a = [1], b = 0: the extra coordinate must not be dropped
    let long: VectorValues = [(x(0), vec![-1.0, 5.0])].into_iter().collect();
    assert_eq!(
        ineq.error(&long).unwrap_err(),
        ConstraintError::DimensionMismatch {
            key: x(0),
            expected: 1,
            actual: 2,
        }
    );
    assert!(linear.is_feasible(&long, 1e-9).is_err());

    let short: VectorValues = [(x(0), vec![])].into_iter().collect();
    assert!(matches!(
        ineq.dot_product_row(&short),
        Err(ConstraintError::DimensionMismatch { actual: 0, .. })
    ));
}
