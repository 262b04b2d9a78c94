use glam::DVec3;
use squish_ball::sim::PhaseStep;
use squish_ball::{BallParams, Phase, Scene, SceneSnapshot, Settings};

/// Peak heights reached between successive ground contacts
fn bounce_peaks(scene: &mut Scene, id: u32, ticks: usize) -> Vec<f64> {
    let mut peaks = Vec::new();
    let mut peak: f64 = 0.0;
    for _ in 0..ticks {
        let mut landed = false;
        scene.tick_with(|_, step: &PhaseStep| {
            if step.from == Phase::Freefall && step.to == Phase::Squeeze {
                landed = true;
            }
        });
        if landed {
            peaks.push(peak);
            peak = 0.0;
        }
        peak = peak.max(scene.object(id).unwrap().position.z);
    }
    peaks
}

#[test]
fn bounces_lose_height_then_settle() {
    let mut scene = Scene::new(BallParams::default()).unwrap();
    let id = scene.spawn(DVec3::new(1.0, 2.0, 5.0)).unwrap();

    let peaks = bounce_peaks(&mut scene, id, 400);
    // Later bounces are too short to sample reliably at 10 Hz
    assert!(peaks.len() >= 5, "expected several bounces, got {peaks:?}");
    assert!(peaks[0] > 4.9);
    for pair in peaks[..5].windows(2) {
        assert!(pair[1] < pair[0], "peaks should shrink: {peaks:?}");
    }

    for _ in 0..2000 {
        scene.tick();
        if scene.all_resting() {
            break;
        }
    }
    assert!(scene.all_resting());

    let object = scene.object(id).unwrap();
    assert_eq!((object.position.x, object.position.y), (1.0, 2.0));
    assert!((object.position.z - 0.5).abs() < 1e-4);
    assert_eq!(scene.record(id).unwrap().phase, Phase::Freefall);
}

#[test]
fn snapshot_resumes_mid_bounce() {
    let mut scene = Scene::new(BallParams::default()).unwrap();
    scene.scatter(4, 31, 3.0, 1.0, 6.0).unwrap();
    for _ in 0..12 {
        scene.tick();
    }

    let json = scene.snapshot().to_json().unwrap();
    let mut resumed = Scene::restore(SceneSnapshot::from_json(&json).unwrap()).unwrap();

    for _ in 0..25 {
        scene.tick();
        resumed.tick();
    }

    for (a, b) in scene.objects().iter().zip(resumed.objects()) {
        assert_eq!(a.id, b.id);
        assert!((a.position - b.position).length() < 1e-6);
        assert_eq!(scene.record(a.id).unwrap().phase, resumed.record(b.id).unwrap().phase);
    }
}

#[test]
fn settings_drive_the_scene() {
    let settings = Settings::from_json(
        r#"{
            "physics": { "bounce_retention": 0.3 },
            "run": { "ball_count": 2, "seed": 5, "min_height": 1.0, "max_height": 1.5 }
        }"#,
    )
    .unwrap();

    let mut scene = Scene::new(settings.physics).unwrap();
    let run = &settings.run;
    let ids = scene
        .scatter(run.ball_count, run.seed, run.spread, run.min_height, run.max_height)
        .unwrap();
    assert_eq!(ids, vec![1, 2]);

    for _ in 0..run.ticks {
        scene.tick();
    }
    assert!(scene.all_resting());
}
