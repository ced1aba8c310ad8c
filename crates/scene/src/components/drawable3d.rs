use crate::resources::ModelResource;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape3D {
    Sphere { radius: f64 },
    Model(ModelResource),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawable3D {
    pub shape: Shape3D,
}

impl Drawable3D {
    pub fn sphere(radius: f64) -> Self {
        Self {
            shape: Shape3D::Sphere { radius },
        }
    }

    pub fn model(resource: ModelResource) -> Self {
        Self {
            shape: Shape3D::Model(resource),
        }
    }

    pub fn is_model(&self) -> bool {
        matches!(self.shape, Shape3D::Model(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{Drawable3D, Shape3D};
    use crate::resources::{ModelResource, ModelSource};

    #[test]
    fn create_sphere_and_model_drawables() {
        let drawable = Drawable3D::sphere(0.2);
        assert!(matches!(drawable.shape, Shape3D::Sphere { .. }));
        assert!(!drawable.is_model());

        let pin = ModelResource::new(ModelSource::Bundled("Pin_V2".to_string()), Vec::new());
        assert!(Drawable3D::model(pin).is_model());
    }
}
