#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use launch_dash::{DashContext, LaunchTable};

/// Small launch table in the dataset's column layout (unnamed index column first).
pub const LAUNCHES_CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,0.0,F9 v1.0  B0004,v1.0
2,3,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
3,4,CCAFS LC-40,0,500.0,F9 v1.0  B0006,v1.0
4,5,CCAFS LC-40,0,677.0,F9 v1.0  B0007,v1.0
5,6,VAFB SLC-4E,0,500.0,F9 v1.1B1003,v1.1
6,7,CCAFS LC-40,1,3170.0,F9 v1.1,v1.1
7,8,CCAFS LC-40,1,3325.0,F9 v1.1,v1.1
8,9,CCAFS LC-40,0,2296.0,F9 v1.1,v1.1
9,10,CCAFS LC-40,1,1316.0,F9 v1.1,v1.1
10,11,CCAFS LC-40,1,4535.0,F9 v1.1,v1.1
11,12,CCAFS LC-40,0,2216.0,F9 v1.1,v1.1
12,13,VAFB SLC-4E,0,9600.0,F9 FT B1029.1,FT
13,14,CCAFS LC-40,1,2034.0,F9 FT B1021.1,FT
14,15,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
15,16,KSC LC-39A,1,5600.0,F9 FT B1030,FT
16,17,KSC LC-39A,0,5300.0,F9 FT B1021.2,FT
17,18,KSC LC-39A,1,3696.65,F9 FT B1032.1,FT
18,19,VAFB SLC-4E,1,9600.0,F9 FT B1036.1,FT
19,20,KSC LC-39A,1,6070.0,F9 B4 B1039.1,B4
20,21,CCAFS SLC-40,0,5800.0,F9 B4 B1043.1,B4
21,22,CCAFS SLC-40,1,2708.0,F9 B4 B1040.2,B4
22,23,CCAFS SLC-40,1,3669.0,F9 B5 B1046.1,B5
23,24,CCAFS SLC-40,1,2205.0,F9 B4 B1045.1,B4
";

pub fn temp_dir(prefix: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let root = std::env::temp_dir().join(format!("launch-dash-{prefix}-{stamp}"));
    fs::create_dir_all(&root).expect("create temp dir");
    root
}

pub fn write_file(path: &Path, text: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(path, text).expect("write file");
}

pub fn launches_table() -> LaunchTable {
    LaunchTable::from_reader(LAUNCHES_CSV.as_bytes()).expect("parse fixture")
}

pub fn launches_context() -> DashContext {
    DashContext::new(launches_table()).expect("build context")
}
