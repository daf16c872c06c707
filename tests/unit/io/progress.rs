//! Tests for progress tracking across batch runs

#[cfg(test)]
mod tests {
    use micromouse::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use micromouse::io::progress::ProgressManager;

    // Tests ProgressManager construction and a single run lifecycle
    // Verified by setting wrong initial state
    #[test]
    fn test_progress_manager_new() {
        let mut pm = ProgressManager::new();

        pm.initialize(0);
        assert_eq!(pm.run_count(), 0);
        pm.finish();

        pm.initialize(1);
        pm.start_run(0, 42, 100);
        pm.update_step(0, 50);
        pm.complete_run(0, "completed");
        pm.finish();
        assert_eq!(pm.run_count(), 1);
    }

    // Tests default trait implementation
    // Verified by creating different initial states
    #[test]
    fn test_progress_manager_default() {
        let mut pm = ProgressManager::default();
        pm.initialize(2);
        assert_eq!(pm.run_count(), 2);

        pm.start_run(0, 1, 10);
        pm.start_run(1, 2, 10);
        pm.update_step(1, 3);
        pm.complete_run(1, "stuck");
        pm.complete_run(0, "completed");
        pm.finish();
    }

    // Tests batch mode with more runs than individual bars
    // Verified by indexing bars with the run index
    #[test]
    fn test_many_runs() {
        let run_count = MAX_INDIVIDUAL_PROGRESS_BARS * 3;
        let mut pm = ProgressManager::new();
        pm.initialize(run_count);

        for index in 0..run_count {
            pm.start_run(index, index as u64, 20);
            pm.update_step(index, 10);
            pm.complete_run(index, "completed");
        }
        pm.finish();
    }

    // Tests updates for runs that were never started are ignored
    // Verified by resizing state on update
    #[test]
    fn test_unknown_run_index() {
        let mut pm = ProgressManager::new();
        pm.initialize(1);
        pm.update_step(7, 3);
        pm.complete_run(7, "stuck");
        pm.finish();
    }
}
