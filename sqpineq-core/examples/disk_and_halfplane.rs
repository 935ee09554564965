use sqpineq::{Key, KktOptions, NonlinearInequalityGraph, ScalarInequality, Values, VectorValues};
use tracing_subscriber::EnvFilter;

fn main() -> sqpineq::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let p = Key::symbol('x', 0);

    // x² + y² - 1 <= 0
    let disk = ScalarInequality::new(
        vec![(p, 2)],
        Key::symbol('l', 0),
        |x: &[f64]| x[0] * x[0] + x[1] * x[1] - 1.0,
        |x: &[f64], g: &mut [f64]| {
            g[0] = 2.0 * x[0];
            g[1] = 2.0 * x[1];
        },
    );
    // 0.5 - x <= 0
    let halfplane = ScalarInequality::new(
        vec![(p, 2)],
        Key::symbol('l', 1),
        |x: &[f64]| 0.5 - x[0],
        |_x: &[f64], g: &mut [f64]| {
            g[0] = -1.0;
            g[1] = 0.0;
        },
    );

    let mut graph = NonlinearInequalityGraph::new();
    graph.add(disk)?;
    graph.add(halfplane)?;

    let mut values = Values::new();
    values.insert(p, vec![0.6, 0.8]);

    let linear = graph.linearize(&values)?;
    for ineq in &linear {
        println!(
            "dual {} | a {:?} | b {:+.3}",
            ineq.dual_key(),
            ineq.jacobian().block(p).unwrap_or_default(),
            ineq.jacobian().b()[0]
        );
    }

    let mut duals = VectorValues::new();
    duals.insert(Key::symbol('l', 0), vec![0.4]);

    let options = KktOptions {
        tol: 1e-9,
        collect_trace: true,
    };
    let report = graph.kkt_report(&values, &duals, &options)?;
    println!("kkt: {:?}", report.status);
    for record in report.trace.unwrap_or_default() {
        println!("  {record}");
    }

    let correction = graph.multiplied_hessians(&values, &duals)?;
    println!("hessian terms: {}", correction.len());
    println!("merit: {:.6}", graph.total_violation(&values)?);
    Ok(())
}
