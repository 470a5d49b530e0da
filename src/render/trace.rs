use crate::math::{Ray, Vec3};
use crate::render::march::{estimate_normal, ray_march, MarchHit, MarchSettings};
use crate::render::shading::{background_color, light_surface, Lighting};
use crate::render::texture::{apply_texture, SurfaceTexture};
use crate::render::FrameInputs;
use crate::scene::Scene;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shade {
    Surface {
        hit: MarchHit,
        normal: Vec3,
        lighting: Lighting,
        color: Vec3,
    },
    Background(Vec3),
}

impl Shade {
    pub fn color(&self) -> Vec3 {
        match self {
            Self::Surface { color, .. } => *color,
            Self::Background(color) => *color,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Surface { .. })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Tracer<'a> {
    scene: Scene,
    march: MarchSettings,
    texture: Option<&'a SurfaceTexture>,
    texture_intensity: f32,
}

impl<'a> Tracer<'a> {
    pub fn new(inputs: &FrameInputs<'a>, march: MarchSettings) -> Self {
        Self {
            scene: inputs.scene(),
            march,
            texture: inputs.texture,
            texture_intensity: inputs.parameters.texture_intensity,
        }
    }

    pub fn trace(&self, ray: Ray) -> Shade {
        let Some(hit) = ray_march(&self.scene, ray, self.march) else {
            return Shade::Background(background_color(ray.direction, self.scene.time()));
        };

        let normal = estimate_normal(&self.scene, hit.point, self.scene.deformation());
        let lighting = light_surface(&self.scene, hit.point, ray.direction, normal);
        let mut color = lighting.color();

        if let Some(texture) = self.texture {
            if self.texture_intensity > 0.0 {
                let texel = texture.sample_normal(self.scene.to_local(normal));
                color = apply_texture(color, texel, self.texture_intensity);
            }
        }

        Shade::Surface {
            hit,
            normal,
            lighting,
            color,
        }
    }
}
