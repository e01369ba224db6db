//! Tests for format constants and runtime defaults

#[cfg(test)]
mod tests {
    use gridmerge::io::configuration::{
        EXIT_ABORTED, EXIT_FAILURE, EXIT_VALIDATION, HOLE_SENTINEL, MAX_WORKER_THREADS,
        default_workers,
    };

    // Tests the default worker count stays within the configured cap
    // Verified by returning available parallelism uncapped
    #[test]
    fn test_default_workers_bounded() {
        let workers = default_workers().get();
        assert!(workers >= 1);
        assert!(workers <= MAX_WORKER_THREADS);
    }

    // Tests exit codes are distinct and non-zero
    // Verified by reusing the failure code for aborts
    #[test]
    fn test_exit_codes_distinct() {
        let codes = [EXIT_FAILURE, EXIT_VALIDATION, EXIT_ABORTED];
        assert!(codes.iter().all(|&code| code != 0));
        assert_ne!(EXIT_FAILURE, EXIT_VALIDATION);
        assert_ne!(EXIT_VALIDATION, EXIT_ABORTED);
        assert_ne!(EXIT_FAILURE, EXIT_ABORTED);
    }

    // Tests the hole sentinel can never collide with a dictionary value
    // Verified by wrapping the sentinel in parentheses
    #[test]
    fn test_hole_sentinel_unparenthesised() {
        assert!(!HOLE_SENTINEL.starts_with('('));
    }
}
