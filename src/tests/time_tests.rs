#[cfg(test)]
mod tests {
    use crate::Time;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_new_time_has_zero_delta() {
        let time = Time::new();
        assert_eq!(time.delta(), Duration::ZERO);
        assert_eq!(time.delta_seconds(), 0.0);
    }

    #[test]
    fn test_update_accumulates_elapsed_time() {
        let mut time = Time::new();
        sleep(Duration::from_millis(10));
        time.update();

        assert!(time.delta() >= Duration::from_millis(10));
        assert!(time.delta_seconds() > 0.0);
    }
}
