//! 輸入檢查

use bunker_core::{Bunker, BunkerError, Request};

/// 檢查請求與船隊參數，不合法時回傳 `InvalidInput`
pub fn validate_instance(requests: &[Request], bunkers: &[Bunker]) -> bunker_core::Result<()> {
    if requests.is_empty() {
        return Err(BunkerError::InvalidInput("請求列表為空".to_string()));
    }
    if bunkers.is_empty() {
        return Err(BunkerError::InvalidInput("至少需要一艘加油船".to_string()));
    }

    for (index, request) in requests.iter().enumerate() {
        if request.start_time < 0 {
            return Err(BunkerError::InvalidInput(format!(
                "請求 {} 的開始時間為負數: {}",
                index, request.start_time
            )));
        }
        if request.volume <= 0 {
            return Err(BunkerError::InvalidInput(format!(
                "請求 {} 的油量必須為正數: {}",
                index, request.volume
            )));
        }
    }

    if let Some(index) = requests
        .windows(2)
        .position(|pair| pair[1].start_time < pair[0].start_time)
    {
        return Err(BunkerError::InvalidInput(format!(
            "請求未按時間排序: 請求 {} ({}) 早於請求 {} ({})",
            index + 1,
            requests[index + 1].start_time,
            index,
            requests[index].start_time
        )));
    }

    for (index, bunker) in bunkers.iter().enumerate() {
        if bunker.capacity <= 0 {
            return Err(BunkerError::InvalidInput(format!(
                "加油船 {} 的容量必須為正數: {}",
                index, bunker.capacity
            )));
        }
        if bunker.full_refill_duration <= 0 {
            return Err(BunkerError::InvalidInput(format!(
                "加油船 {} 的滿艙補給時間必須為正數: {}",
                index, bunker.full_refill_duration
            )));
        }
        if bunker.initial_fuel < 0 || bunker.initial_fuel > bunker.capacity {
            return Err(BunkerError::InvalidInput(format!(
                "加油船 {} 的初始油量 {} 超出範圍 [0, {}]",
                index, bunker.initial_fuel, bunker.capacity
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fleet() -> Vec<Bunker> {
        vec![Bunker::new(100, 30)]
    }

    #[test]
    fn test_valid_instance() {
        let requests = vec![Request::new(10, 40), Request::new(10, 5), Request::new(100, 10)];
        assert!(validate_instance(&requests, &fleet()).is_ok());
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::negative_start(vec![Request::new(-1, 10)])]
    #[case::zero_volume(vec![Request::new(0, 0)])]
    #[case::negative_volume(vec![Request::new(0, -5)])]
    #[case::unordered(vec![Request::new(100, 10), Request::new(10, 40)])]
    fn test_invalid_requests(#[case] requests: Vec<Request>) {
        assert!(matches!(
            validate_instance(&requests, &fleet()),
            Err(BunkerError::InvalidInput(_))
        ));
    }

    #[rstest]
    #[case::no_bunkers(vec![])]
    #[case::zero_capacity(vec![Bunker::new(0, 30)])]
    #[case::zero_duration(vec![Bunker::new(100, 0)])]
    #[case::overfull(vec![Bunker::new(100, 30).with_initial_fuel(150)])]
    #[case::one_bad_in_fleet(vec![Bunker::new(100, 30), Bunker::new(-1, 30)])]
    fn test_invalid_bunkers(#[case] bunkers: Vec<Bunker>) {
        let requests = vec![Request::new(10, 40)];
        assert!(matches!(
            validate_instance(&requests, &bunkers),
            Err(BunkerError::InvalidInput(_))
        ));
    }
}
