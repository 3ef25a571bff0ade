//! Stage and wave catalog
//!
//! Static, declarative spawn data. A catalog is validated once when it is
//! built or loaded; the tick code trusts it afterwards.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, read_file};

/// One enemy in a wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Top-left spawn position
    pub position: Vec2,
}

impl EnemySpawn {
    pub const fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
        }
    }
}

/// A batch of enemies spawned together
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Wave {
    pub enemies: Vec<EnemySpawn>,
}

/// Boss descriptor for the end of a stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossSpawn {
    pub position: Vec2,
    pub health: i32,
}

/// Ordered waves, optionally followed by a boss
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stage {
    pub waves: Vec<Wave>,
    #[serde(default)]
    pub boss: Option<BossSpawn>,
}

impl Stage {
    pub fn wave(&self, index: usize) -> Option<&Wave> {
        self.waves.get(index)
    }

    /// True if a wave exists after `index`
    pub fn has_wave_after(&self, index: usize) -> bool {
        index + 1 < self.waves.len()
    }
}

/// Validated, immutable list of stages
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StageCatalog {
    stages: Vec<Stage>,
}

impl StageCatalog {
    /// Build a catalog, rejecting malformed geometry up front
    pub fn new(stages: Vec<Stage>) -> Result<Self> {
        if stages.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        for (stage_idx, stage) in stages.iter().enumerate() {
            validate_stage(stage_idx, stage)?;
        }
        Ok(Self { stages })
    }

    /// Parse a catalog from JSON (`[{ "waves": [...], "boss": {...} }, ...]`)
    pub fn from_json(json: &str) -> Result<Self> {
        let stages: Vec<Stage> = serde_json::from_str(json)?;
        Self::new(stages)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let catalog = Self::from_json(&read_file(path)?)?;
        log::info!(
            "Loaded {} stage(s) from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Stage at `index`; out-of-range indices read as "no stage"
    pub fn stage(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }
}

impl Default for StageCatalog {
    /// The built-in single stage: three waves and a boss
    fn default() -> Self {
        Self {
            stages: vec![Stage {
                waves: vec![
                    Wave {
                        enemies: vec![EnemySpawn::at(200.0, 100.0), EnemySpawn::at(400.0, 100.0)],
                    },
                    Wave {
                        enemies: vec![
                            EnemySpawn::at(100.0, 100.0),
                            EnemySpawn::at(300.0, 100.0),
                            EnemySpawn::at(500.0, 100.0),
                        ],
                    },
                    Wave {
                        enemies: vec![
                            EnemySpawn::at(200.0, 50.0),
                            EnemySpawn::at(400.0, 50.0),
                            EnemySpawn::at(200.0, 150.0),
                            EnemySpawn::at(400.0, 150.0),
                        ],
                    },
                ],
                boss: Some(BossSpawn {
                    position: Vec2::new(325.0, 50.0),
                    health: 30,
                }),
            }],
        }
    }
}

impl<'de> Deserialize<'de> for StageCatalog {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let stages = Vec::<Stage>::deserialize(deserializer)?;
        Self::new(stages).map_err(serde::de::Error::custom)
    }
}

#[inline]
fn valid_coord(v: f32) -> bool {
    v.is_finite() && v >= 0.0
}

fn validate_stage(stage_idx: usize, stage: &Stage) -> Result<()> {
    for (wave_idx, wave) in stage.waves.iter().enumerate() {
        for (index, spawn) in wave.enemies.iter().enumerate() {
            let Vec2 { x, y } = spawn.position;
            if !valid_coord(x) || !valid_coord(y) {
                return Err(Error::InvalidSpawn {
                    stage: stage_idx,
                    wave: wave_idx,
                    index,
                    x,
                    y,
                });
            }
        }
    }

    if let Some(boss) = &stage.boss {
        if !valid_coord(boss.position.x) || !valid_coord(boss.position.y) {
            return Err(Error::InvalidBoss {
                stage: stage_idx,
                reason: format!("invalid position ({}, {})", boss.position.x, boss.position.y),
            });
        }
        if boss.health <= 0 {
            return Err(Error::InvalidBoss {
                stage: stage_idx,
                reason: format!("health must be positive, got {}", boss.health),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let builtin = StageCatalog::default();
        let rebuilt = StageCatalog::new(builtin.stages().to_vec()).unwrap();
        assert_eq!(rebuilt, builtin);
        assert_eq!(builtin.len(), 1);
        assert_eq!(builtin.stage(0).unwrap().waves.len(), 3);
    }

    #[test]
    fn test_out_of_range_stage_is_none() {
        let catalog = StageCatalog::default();
        assert!(catalog.stage(1).is_none());
        assert!(catalog.stage(usize::MAX).is_none());
    }

    #[test]
    fn test_has_wave_after() {
        let stage = StageCatalog::default().stage(0).unwrap().clone();
        assert!(stage.has_wave_after(0));
        assert!(stage.has_wave_after(1));
        assert!(!stage.has_wave_after(2));
        assert!(!Stage::default().has_wave_after(0));
    }

    #[test]
    fn test_negative_spawn_rejected() {
        let stages = vec![Stage {
            waves: vec![Wave {
                enemies: vec![EnemySpawn::at(10.0, 10.0), EnemySpawn::at(-5.0, 10.0)],
            }],
            boss: None,
        }];
        let err = StageCatalog::new(stages).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSpawn {
                stage: 0,
                wave: 0,
                index: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_nan_spawn_rejected() {
        let stages = vec![
            Stage::default(),
            Stage {
                waves: vec![Wave::default(), Wave {
                    enemies: vec![EnemySpawn::at(f32::NAN, 0.0)],
                }],
                boss: None,
            },
        ];
        assert!(matches!(
            StageCatalog::new(stages),
            Err(Error::InvalidSpawn { stage: 1, wave: 1, index: 0, .. })
        ));
    }

    #[test]
    fn test_boss_health_must_be_positive() {
        let stages = vec![Stage {
            waves: Vec::new(),
            boss: Some(BossSpawn {
                position: Vec2::new(0.0, 0.0),
                health: 0,
            }),
        }];
        assert!(matches!(
            StageCatalog::new(stages),
            Err(Error::InvalidBoss { stage: 0, .. })
        ));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(StageCatalog::new(Vec::new()), Err(Error::EmptyCatalog)));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            { "waves": [ { "enemies": [ { "position": [10.0, 20.0] } ] } ] },
            { "waves": [], "boss": { "position": [100.0, 40.0], "health": 12 } }
        ]"#;
        let catalog = StageCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.stage(0).unwrap().waves[0].enemies[0].position,
            Vec2::new(10.0, 20.0)
        );
        assert!(catalog.stage(0).unwrap().boss.is_none());
        assert_eq!(catalog.stage(1).unwrap().boss.unwrap().health, 12);
    }

    #[test]
    fn test_from_json_validates() {
        let json = r#"[ { "waves": [ { "enemies": [ { "position": [-1.0, 20.0] } ] } ] } ]"#;
        assert!(matches!(
            StageCatalog::from_json(json),
            Err(Error::InvalidSpawn { .. })
        ));
    }

    #[test]
    fn test_demo_catalog_parses() {
        let catalog = StageCatalog::from_json(include_str!("../../demos/stages.json")).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.stages().iter().all(|s| s.boss.is_some()));
    }
}
