//! Console summary printed to stderr after `analyze`, so CI logs carry the
//! outcome without opening the report artifact.

use crate::analysis::EvaluationVerdict;

pub fn print_summary(verdicts: &[EvaluationVerdict]) {
    eprintln!();
    eprintln!("{}", "=".repeat(60));
    eprintln!("EVALUATION SUMMARY");
    eprintln!("{}", "=".repeat(60));

    for v in verdicts {
        let status = if v.passed { "PASS" } else { "FAIL" };
        eprintln!();
        eprintln!("{}: {}", v.model_name, status);
        eprintln!("  Understanding: {:.2}/4", v.understanding_score);

        if let Some(delta) = v.vs_base_delta {
            eprintln!("  vs Base: {:+.2}", delta);
        }
        if let Some(delta) = v.vs_shuffled_delta {
            eprintln!("  vs Shuffled: {:+.2}", delta);
        }

        if !v.kill_criteria.is_empty() {
            eprintln!("  KILL CRITERIA:");
            for kill in &v.kill_criteria {
                eprintln!("    - {kill}");
            }
        }
    }
}
