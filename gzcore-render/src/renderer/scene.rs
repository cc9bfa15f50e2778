//! Hooks the game-side BSP walk calls for each visible object.
//!
//! The descriptors are opaque here; a `SceneProcessor` turns them into wall,
//! sprite and flat geometry.

use super::Renderer;
use crate::backend::RenderBackend;
use crate::material::MaterialSource;

pub trait SceneProcessor {
    type Seg;
    type Sector;
    type Actor;
    type Particle;

    /// Lower part of a miniseg between two sectors.
    fn process_lower_miniseg(&mut self, seg: &Self::Seg, front: &Self::Sector, back: &Self::Sector);

    fn process_sprite(&mut self, thing: &Self::Actor, sector: &Self::Sector, thru_portal: bool);

    fn process_particle(&mut self, particle: &Self::Particle, sector: &Self::Sector);

    fn process_sector(&mut self, sector: &Self::Sector);
}

impl<B: RenderBackend, M: MaterialSource> Renderer<B, M> {
    pub fn process_lower_miniseg<P: SceneProcessor>(
        &mut self,
        processor: &mut P,
        seg: &P::Seg,
        front: &P::Sector,
        back: &P::Sector,
    ) {
        processor.process_lower_miniseg(seg, front, back);
        self.rendered_lines += 1;
    }

    pub fn process_sprite<P: SceneProcessor>(
        &mut self,
        processor: &mut P,
        thing: &P::Actor,
        sector: &P::Sector,
        thru_portal: bool,
    ) {
        processor.process_sprite(thing, sector, thru_portal);
    }

    pub fn process_particle<P: SceneProcessor>(
        &mut self,
        processor: &mut P,
        particle: &P::Particle,
        sector: &P::Sector,
    ) {
        processor.process_particle(particle, sector);
    }

    pub fn process_sector<P: SceneProcessor>(&mut self, processor: &mut P, sector: &P::Sector) {
        processor.process_sector(sector);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CommandBuffer;
    use crate::material::MaterialCache;
    use gzcore_config::RenderConfig;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl SceneProcessor for Recorder {
        type Seg = u32;
        type Sector = u32;
        type Actor = &'static str;
        type Particle = u8;

        fn process_lower_miniseg(&mut self, seg: &u32, front: &u32, back: &u32) {
            self.calls.push(format!("seg {seg} {front}/{back}"));
        }

        fn process_sprite(&mut self, thing: &&'static str, sector: &u32, thru_portal: bool) {
            self.calls.push(format!("sprite {thing} {sector} {thru_portal}"));
        }

        fn process_particle(&mut self, particle: &u8, sector: &u32) {
            self.calls.push(format!("particle {particle} {sector}"));
        }

        fn process_sector(&mut self, sector: &u32) {
            self.calls.push(format!("sector {sector}"));
        }
    }

    #[test]
    fn test_hooks_forward_and_count_lines() {
        let mut r = Renderer::new(CommandBuffer::new(), MaterialCache::new(), &RenderConfig::default());
        let mut scene = Recorder::default();
        r.process_lower_miniseg(&mut scene, &1, &2, &3);
        r.process_lower_miniseg(&mut scene, &4, &2, &3);
        r.process_sprite(&mut scene, &"imp", &2, false);
        r.process_particle(&mut scene, &9, &2);
        r.process_sector(&mut scene, &2);

        assert_eq!(
            scene.calls,
            ["seg 1 2/3", "seg 4 2/3", "sprite imp 2 false", "particle 9 2", "sector 2"]
        );
        assert_eq!(r.rendered_lines(), 2);
        r.reset_rendered_lines();
        assert_eq!(r.rendered_lines(), 0);
    }
}
