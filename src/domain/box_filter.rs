use super::PrizeValue;
use crate::models::PrizeBox;

/// Picks the boxes reported for one treasure.
///
/// Without a floor only the cheapest boxes are kept (every box tied at the
/// minimum `amt`). With a floor, every box whose `amt` reaches it is kept.
/// Input order is preserved in both modes.
#[must_use]
pub fn select_boxes(boxes: Vec<PrizeBox>, prize_floor: Option<PrizeValue>) -> Vec<PrizeBox> {
    match prize_floor {
        Some(floor) => boxes
            .into_iter()
            .filter(|b| b.amt >= floor.amt())
            .collect(),
        None => {
            let Some(min) = boxes.iter().map(|b| b.amt).min() else {
                return Vec::new();
            };
            boxes.into_iter().filter(|b| b.amt == min).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TreasureId;

    fn boxes(amts: &[i32]) -> Vec<PrizeBox> {
        amts.iter()
            .zip(1..)
            .map(|(&amt, id)| PrizeBox {
                id,
                treasure_id: TreasureId::new(100),
                amt,
            })
            .collect()
    }

    fn amts(selected: &[PrizeBox]) -> Vec<i32> {
        selected.iter().map(|b| b.amt).collect()
    }

    #[test]
    fn test_cheapest_keeps_all_ties() {
        let selected = select_boxes(boxes(&[15, 20, 15]), None);
        assert_eq!(amts(&selected), vec![15, 15]);
        assert_eq!(
            selected.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn test_cheapest_single_box() {
        assert_eq!(amts(&select_boxes(boxes(&[25, 10, 30]), None)), vec![10]);
    }

    #[test]
    fn test_floor_keeps_boxes_at_or_above() {
        let floor = PrizeValue::new_unchecked(20);
        assert_eq!(
            amts(&select_boxes(boxes(&[15, 20, 25]), Some(floor))),
            vec![20, 25]
        );
    }

    #[test]
    fn test_floor_can_select_nothing() {
        let floor = PrizeValue::new_unchecked(30);
        assert!(select_boxes(boxes(&[15, 20, 25]), Some(floor)).is_empty());
    }

    #[test]
    fn test_no_boxes_in_either_mode() {
        assert!(select_boxes(Vec::new(), None).is_empty());
        assert!(select_boxes(Vec::new(), Some(PrizeValue::new_unchecked(10))).is_empty());
    }
}
