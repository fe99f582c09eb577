//! Built-in scene constructors.
//!
//! Each scene returns the world wrapped in a BVH plus a camera configured
//! for it. Cameras are returned uninitialized so the caller can apply
//! resolution and quality overrides first.

use std::sync::Arc;

use glint_render::{
    cuboid, gen_f64, random_color, random_color_range, random_f64_range, Annulus, Background,
    BvhNode, Camera, CheckerTexture, Color, ConstantMedium, Dielectric, DiffuseLight, Ellipse,
    Hittable, HittableList, ImageTexture, Lambertian, Metal, NoiseTexture, Point3, Quad, RotateY,
    Sphere, Translate, Triangle, Vec3,
};
use rand::RngCore;

use crate::cli::SceneKind;

/// Build the world and camera for the selected scene.
pub fn build(kind: SceneKind, rng: &mut dyn RngCore) -> (Arc<dyn Hittable>, Camera) {
    match kind {
        SceneKind::BouncingSpheres => bouncing_spheres(rng),
        SceneKind::CheckeredSpheres => checkered_spheres(rng),
        SceneKind::Earth => earth(rng),
        SceneKind::PerlinSpheres => perlin_spheres(rng),
        SceneKind::Quads => quads(rng),
        SceneKind::PlanarShapes => planar_shapes(rng),
        SceneKind::SimpleLights => simple_lights(rng),
        SceneKind::CornellBox => cornell_box(rng),
        SceneKind::CornellSmoke => cornell_smoke(rng),
    }
}

/// The book cover scene: a checkered ground plane, a grid of random small
/// spheres with motion blur on the diffuse ones, and three large feature
/// spheres.
fn bouncing_spheres(rng: &mut dyn RngCore) -> (Arc<dyn Hittable>, Camera) {
    let mut world = HittableList::new();

    // Ground
    let checker = Arc::new(CheckerTexture::from_colors(
        0.32,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::textured(checker)),
    )));

    // Small random spheres
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f64(rng);
            let center = Point3::new(
                a as f64 + 0.9 * gen_f64(rng),
                0.2,
                b as f64 + 0.9 * gen_f64(rng),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                // Diffuse, drifting upward over the shutter interval
                let albedo = random_color(rng) * random_color(rng);
                let center2 = center + Vec3::new(0.0, random_f64_range(rng, 0.0, 0.5), 0.0);
                world.add(Arc::new(Sphere::moving(
                    center,
                    center2,
                    0.2,
                    Arc::new(Lambertian::new(albedo)),
                )));
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_color_range(rng, 0.5, 1.0);
                let fuzz = random_f64_range(rng, 0.0, 0.5);
                world.add(Arc::new(Sphere::new(
                    center,
                    0.2,
                    Arc::new(Metal::new(albedo, fuzz)),
                )));
            } else {
                // Glass
                world.add(Arc::new(Sphere::new(
                    center,
                    0.2,
                    Arc::new(Dielectric::new(1.5)),
                )));
            }
        }
    }

    // Three main spheres
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    let camera = Camera::new()
        .with_resolution(400, 16.0 / 9.0)
        .with_quality(100, 50)
        .with_position(
            Point3::new(13.0, 2.0, 3.0),
            Point3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
        )
        .with_lens(20.0, 0.6, 10.0)
        .with_background(Background::Solid(Color::new(0.70, 0.90, 1.00)));

    (Arc::new(BvhNode::new(world, rng)), camera)
}

/// Two large checkered spheres touching at the origin.
fn checkered_spheres(rng: &mut dyn RngCore) -> (Arc<dyn Hittable>, Camera) {
    let mut world = HittableList::new();

    let checker = Arc::new(CheckerTexture::from_colors(
        0.32,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));

    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -10.0, 0.0),
        10.0,
        Arc::new(Lambertian::textured(checker.clone())),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, 10.0, 0.0),
        10.0,
        Arc::new(Lambertian::textured(checker)),
    )));

    let camera = Camera::new()
        .with_resolution(400, 16.0 / 9.0)
        .with_quality(100, 50)
        .with_position(
            Point3::new(13.0, 2.0, 3.0),
            Point3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
        )
        .with_lens(20.0, 0.0, 10.0)
        .with_background(Background::Solid(Color::new(0.70, 0.90, 1.00)));

    (Arc::new(BvhNode::new(world, rng)), camera)
}

/// A single globe wrapped in an equirectangular Earth texture.
///
/// Expects `earthmap.jpg` in the working directory; renders a solid
/// fallback color if the file is missing.
fn earth(rng: &mut dyn RngCore) -> (Arc<dyn Hittable>, Camera) {
    let mut world = HittableList::new();

    let earth_texture = Arc::new(ImageTexture::open("earthmap.jpg"));
    world.add(Arc::new(Sphere::new(
        Point3::ZERO,
        2.0,
        Arc::new(Lambertian::textured(earth_texture)),
    )));

    let camera = Camera::new()
        .with_resolution(400, 16.0 / 9.0)
        .with_quality(100, 50)
        .with_position(
            Point3::new(0.0, 0.0, 12.0),
            Point3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
        )
        .with_lens(20.0, 0.0, 10.0)
        .with_background(Background::Solid(Color::new(0.70, 0.90, 1.00)));

    (Arc::new(BvhNode::new(world, rng)), camera)
}

/// Two spheres shaded with marbled Perlin noise.
fn perlin_spheres(rng: &mut dyn RngCore) -> (Arc<dyn Hittable>, Camera) {
    let mut world = HittableList::new();

    let pertext = Arc::new(NoiseTexture::new(4.0, rng));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::textured(pertext.clone())),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, 2.0, 0.0),
        2.0,
        Arc::new(Lambertian::textured(pertext)),
    )));

    let camera = Camera::new()
        .with_resolution(400, 16.0 / 9.0)
        .with_quality(100, 50)
        .with_position(
            Point3::new(12.0, 2.0, 3.0),
            Point3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
        )
        .with_lens(20.0, 0.0, 10.0)
        .with_background(Background::Solid(Color::new(0.70, 0.90, 1.00)));

    (Arc::new(BvhNode::new(world, rng)), camera)
}

/// Five axis-aligned parallelograms forming an open box around the origin.
fn quads(rng: &mut dyn RngCore) -> (Arc<dyn Hittable>, Camera) {
    let mut world = HittableList::new();

    // Materials
    let left_red = Arc::new(Lambertian::new(Color::new(1.0, 0.2, 0.2)));
    let back_green = Arc::new(Lambertian::new(Color::new(0.2, 1.0, 0.2)));
    let right_blue = Arc::new(Lambertian::new(Color::new(0.2, 0.2, 1.0)));
    let upper_orange = Arc::new(Lambertian::new(Color::new(1.0, 0.5, 0.0)));
    let lower_teal = Arc::new(Lambertian::new(Color::new(0.2, 0.8, 0.8)));

    // Quads
    world.add(Arc::new(Quad::new(
        Point3::new(-3.0, -2.0, 5.0),
        Vec3::new(0.0, 0.0, -4.0),
        Vec3::new(0.0, 4.0, 0.0),
        left_red,
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(-2.0, -2.0, 0.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 4.0, 0.0),
        back_green,
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(3.0, -2.0, 1.0),
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::new(0.0, 4.0, 0.0),
        right_blue,
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(-2.0, 3.0, 1.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 4.0),
        upper_orange,
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(-2.0, -3.0, 5.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -4.0),
        lower_teal,
    )));

    let camera = Camera::new()
        .with_resolution(400, 1.0)
        .with_quality(100, 50)
        .with_position(
            Point3::new(0.0, 0.0, 9.0),
            Point3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
        )
        .with_lens(80.0, 0.0, 10.0)
        .with_background(Background::Solid(Color::new(0.70, 0.90, 1.00)));

    (Arc::new(BvhNode::new(world, rng)), camera)
}

/// One of each planar primitive in a 2x2 grid layout.
fn planar_shapes(rng: &mut dyn RngCore) -> (Arc<dyn Hittable>, Camera) {
    let mut world = HittableList::new();

    // Materials
    let red = Arc::new(Lambertian::new(Color::new(1.0, 0.2, 0.2)));
    let green = Arc::new(Lambertian::new(Color::new(0.2, 1.0, 0.2)));
    let blue = Arc::new(Lambertian::new(Color::new(0.2, 0.2, 1.0)));
    let orange = Arc::new(Lambertian::new(Color::new(1.0, 0.5, 0.0)));

    // Primitives
    world.add(Arc::new(Quad::new(
        Point3::new(-2.0, 0.1, 0.0),
        Vec3::new(1.8, 0.0, 0.0),
        Vec3::new(0.0, 1.8, 0.0),
        red,
    )));
    world.add(Arc::new(Triangle::new(
        Point3::new(0.2, 0.1, 0.0),
        Vec3::new(1.8, 0.0, 0.0),
        Vec3::new(0.0, 1.8, 0.0),
        green,
    )));
    world.add(Arc::new(Ellipse::new(
        Point3::new(-1.1, -1.1, 0.0),
        Vec3::new(0.9, 0.0, 0.0),
        Vec3::new(0.0, 0.9, 0.0),
        blue,
    )));
    world.add(Arc::new(Annulus::new(
        Point3::new(1.1, -1.1, 0.0),
        Vec3::new(0.9, 0.0, 0.0),
        Vec3::new(0.0, 0.9, 0.0),
        0.5,
        orange,
    )));

    let camera = Camera::new()
        .with_resolution(400, 1.0)
        .with_quality(100, 50)
        .with_position(
            Point3::new(0.0, 0.0, 12.0),
            Point3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
        )
        .with_lens(20.0, 0.0, 10.0)
        .with_background(Background::Solid(Color::new(0.70, 0.90, 1.00)));

    (Arc::new(BvhNode::new(world, rng)), camera)
}

/// Perlin spheres lit by an emissive sphere and quad against a black sky.
fn simple_lights(rng: &mut dyn RngCore) -> (Arc<dyn Hittable>, Camera) {
    let mut world = HittableList::new();

    let pertext = Arc::new(NoiseTexture::new(4.0, rng));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::textured(pertext.clone())),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, 2.0, 0.0),
        2.0,
        Arc::new(Lambertian::textured(pertext)),
    )));

    // Lights
    let difflight = Arc::new(DiffuseLight::new(Color::new(4.0, 4.0, 4.0)));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, 7.0, 0.0),
        2.0,
        difflight.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(3.0, 1.0, -2.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        difflight,
    )));

    let camera = Camera::new()
        .with_resolution(400, 16.0 / 9.0)
        .with_quality(100, 50)
        .with_position(
            Point3::new(26.0, 3.0, 6.0),
            Point3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
        .with_lens(20.0, 0.0, 10.0)
        .with_background(Background::Solid(Color::ZERO));

    (Arc::new(BvhNode::new(world, rng)), camera)
}

/// The classic Cornell box with two rotated white boxes.
fn cornell_box(rng: &mut dyn RngCore) -> (Arc<dyn Hittable>, Camera) {
    let mut world = HittableList::new();

    let red = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white = Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73)));
    let green = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light = Arc::new(DiffuseLight::new(Color::new(15.0, 15.0, 15.0)));

    // Walls and ceiling light
    world.add(Arc::new(Quad::new(
        Point3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        green,
    )));
    world.add(Arc::new(Quad::new(
        Point3::ZERO,
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        red,
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(343.0, 554.0, 332.0),
        Vec3::new(-130.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -105.0),
        light,
    )));
    world.add(Arc::new(Quad::new(
        Point3::ZERO,
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(555.0, 555.0, 555.0),
        Vec3::new(-555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(0.0, 0.0, 555.0),
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        white.clone(),
    )));

    // Boxes
    let box1 = cuboid(
        Point3::ZERO,
        Point3::new(165.0, 330.0, 165.0),
        white.clone(),
    );
    let box1 = RotateY::new(Arc::new(box1), 15.0);
    let box1 = Translate::new(Arc::new(box1), Vec3::new(265.0, 0.0, 295.0));
    world.add(Arc::new(box1));

    let box2 = cuboid(Point3::ZERO, Point3::new(165.0, 165.0, 165.0), white);
    let box2 = RotateY::new(Arc::new(box2), -18.0);
    let box2 = Translate::new(Arc::new(box2), Vec3::new(130.0, 0.0, 65.0));
    world.add(Arc::new(box2));

    let camera = Camera::new()
        .with_resolution(600, 1.0)
        .with_quality(200, 50)
        .with_position(
            Point3::new(278.0, 278.0, -800.0),
            Point3::new(278.0, 278.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
        .with_lens(40.0, 0.0, 10.0)
        .with_background(Background::Solid(Color::ZERO));

    (Arc::new(BvhNode::new(world, rng)), camera)
}

/// Cornell box variant with the boxes replaced by smoke and fog volumes.
fn cornell_smoke(rng: &mut dyn RngCore) -> (Arc<dyn Hittable>, Camera) {
    let mut world = HittableList::new();

    let red = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white = Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73)));
    let green = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light = Arc::new(DiffuseLight::new(Color::new(7.0, 7.0, 7.0)));

    // Walls and ceiling light
    world.add(Arc::new(Quad::new(
        Point3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        green,
    )));
    world.add(Arc::new(Quad::new(
        Point3::ZERO,
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        red,
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(113.0, 554.0, 127.0),
        Vec3::new(330.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 305.0),
        light,
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(0.0, 555.0, 0.0),
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::ZERO,
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(0.0, 0.0, 555.0),
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        white.clone(),
    )));

    // Smoke volumes shaped by the rotated boxes
    let box1 = cuboid(
        Point3::ZERO,
        Point3::new(165.0, 330.0, 165.0),
        white.clone(),
    );
    let box1 = RotateY::new(Arc::new(box1), 15.0);
    let box1 = Translate::new(Arc::new(box1), Vec3::new(265.0, 0.0, 295.0));
    world.add(Arc::new(ConstantMedium::from_color(
        Arc::new(box1),
        0.01,
        Color::ZERO,
    )));

    let box2 = cuboid(Point3::ZERO, Point3::new(165.0, 165.0, 165.0), white);
    let box2 = RotateY::new(Arc::new(box2), -18.0);
    let box2 = Translate::new(Arc::new(box2), Vec3::new(130.0, 0.0, 65.0));
    world.add(Arc::new(ConstantMedium::from_color(
        Arc::new(box2),
        0.01,
        Color::ONE,
    )));

    let camera = Camera::new()
        .with_resolution(600, 1.0)
        .with_quality(200, 50)
        .with_position(
            Point3::new(278.0, 278.0, -800.0),
            Point3::new(278.0, 278.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
        .with_lens(40.0, 0.0, 10.0)
        .with_background(Background::Solid(Color::ZERO));

    (Arc::new(BvhNode::new(world, rng)), camera)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::{Interval, Ray};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_scene_builds() {
        let kinds = [
            SceneKind::BouncingSpheres,
            SceneKind::CheckeredSpheres,
            SceneKind::Earth,
            SceneKind::PerlinSpheres,
            SceneKind::Quads,
            SceneKind::PlanarShapes,
            SceneKind::SimpleLights,
            SceneKind::CornellBox,
            SceneKind::CornellSmoke,
        ];

        for kind in kinds {
            let mut rng = StdRng::seed_from_u64(1);
            let (world, mut camera) = build(kind, &mut rng);
            camera.initialize();

            let bbox = world.bounding_box();
            assert!(bbox.x.size() > 0.0, "{kind:?} has degenerate bounds");
            assert!(camera.image_height() >= 1);
        }
    }

    #[test]
    fn scene_build_is_reproducible() {
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let (world_a, _) = build(SceneKind::BouncingSpheres, &mut rng_a);
        let (world_b, _) = build(SceneKind::BouncingSpheres, &mut rng_b);

        let bbox_a = world_a.bounding_box();
        let bbox_b = world_b.bounding_box();
        assert_eq!(bbox_a.x.min, bbox_b.x.min);
        assert_eq!(bbox_a.x.max, bbox_b.x.max);
        assert_eq!(bbox_a.z.min, bbox_b.z.min);
        assert_eq!(bbox_a.z.max, bbox_b.z.max);
    }

    #[test]
    fn cornell_box_camera_faces_the_box() {
        let mut rng = StdRng::seed_from_u64(3);
        let (world, mut camera) = build(SceneKind::CornellBox, &mut rng);
        camera.initialize();
        assert_eq!(camera.image_height(), 600);

        // A ray straight down the view axis must hit the back wall.
        let ray = Ray::new_simple(
            Point3::new(278.0, 278.0, -800.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let hit = world.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rng);
        assert!(hit.is_some());
    }
}
