use std::fs;
use std::path::{Path, PathBuf};

/// Small all-India style fixture covering every risk category, a row with a
/// missing value, and an extra column the loader must ignore.
pub const SAMPLE_CSV: &str = "\
state,district,zone,dei,access_health,update_load,stability,literacy
Andhra Pradesh,Anantapur,South,42.5,38.0,55.0,40.0,67.0
Andhra Pradesh,Chittoor,South,61.0,72.0,30.0,25.0,71.9
Assam,Barpeta,East,35.0,52.0,78.5,45.0,63.0
Punjab,Amritsar,North,81.0,88.0,22.0,18.0,76.6
Punjab,Ludhiana,North,47.0,66.0,58.0,72.0,75.5
,Ghost,North,50.0,50.0,50.0,50.0,
Rajasthan,Jaisalmer,West,44.0,58.0,61.0,52.0,70.2
";

pub fn write_sample_csv(dir: &Path) -> PathBuf {
    let path = dir.join("district_equity.csv");
    fs::write(&path, SAMPLE_CSV).expect("write sample csv");
    path
}
