use crate::domain::{Coordinate, TreasureId};
use crate::models::NewTreasure;

/// Demo catalog: eighteen treasures around Metro Manila.
const DEMO_TREASURES: &[(i32, &str, f64, f64)] = &[
    (100, "T1", 14.5437648051331, 121.019911678311),
    (101, "T2", 14.5532076554883, 121.055774532421),
    (102, "T3", 14.5446435656183, 121.020365629871),
    (103, "T4", 14.5872615919051, 120.979504794655),
    (104, "T5", 14.5732032723718, 121.023090376156),
    (105, "T6", 14.5231131289849, 121.019457319516),
    (106, "T7", 14.6024229153284, 121.011513378939),
    (107, "T8", 14.6085746293116, 121.018551395794),
    (108, "T9", 14.4911143426092, 121.043748206197),
    (109, "T10", 14.5445595272478, 121.106088282234),
    (110, "T11", 14.5879814117365, 121.058208029763),
    (111, "T12", 14.5488649285797, 121.03363929755),
    (112, "T13", 14.5371505894201, 120.990430237915),
    (113, "T14", 14.5257966600328, 121.020868844103),
    (114, "T15", 14.5170998780454, 120.981002106201),
    (115, "T16", 14.502006871058, 120.991618127534),
    (116, "T17", 14.521124409049, 121.042771368704),
    (117, "T18", 14.4772076562187, 120.986792724064),
];

pub(super) fn demo_treasures() -> Vec<NewTreasure> {
    DEMO_TREASURES
        .iter()
        .map(|&(id, name, latitude, longitude)| NewTreasure {
            id: TreasureId::new(id),
            name: name.to_string(),
            coordinate: Coordinate::new(latitude, longitude),
        })
        .collect()
}
