use std::sync::Arc;

use boxpile::{Scene, SceneConfig, TextureInfo};
use frenderer::clock::{Clock, Instant};
use frenderer::input::{Input, Key};
use frenderer::sprites::Camera2D;
use frenderer::{EventPhase, FrendererEvents, Renderer};
use winit::event::Event;
use winit::event_loop::EventLoopWindowTarget;
use winit::window::Window;

mod assets;
mod gfx;

const GROUND_IMAGE: &str = "ground.png";
const BOX_IMAGE: &str = "box.png";
const TITLE: &str = "Hello rapier!";
const BANNER_HEIGHT: f32 = 36.0;
const BANNER_TOP: f32 = 50.0;
const PAUSE_KEY: Key = Key::KeyP;
// slower frames than this run in slow motion instead of tunneling
const MAX_FRAME_DT: f32 = 0.05;

// Fields drop top to bottom: scene first, window last.
struct Demo {
    scene: Scene,
    textures: [TextureInfo; 2],
    input: Input,
    clock: Clock,
    last_frame: Instant,
    renderer: Renderer,
    window: Arc<Window>,
}

impl Demo {
    fn new(
        window: Arc<Window>,
        mut renderer: Renderer,
        config: SceneConfig,
        ground_img: &image::RgbaImage,
        box_img: &image::RgbaImage,
        font_sheet: &image::RgbaImage,
    ) -> Self {
        for (name, img) in [(GROUND_IMAGE, ground_img), (BOX_IMAGE, box_img)] {
            log::debug!("{name}: {}x{}", img.width(), img.height());
        }
        let camera = Camera2D {
            screen_pos: [0.0, 0.0],
            screen_size: [config.width, config.height],
        };
        let ground = gfx::add_texture(
            &mut renderer,
            ground_img,
            config.ground_count,
            camera,
            GROUND_IMAGE,
        );
        let block = gfx::add_texture(&mut renderer, box_img, config.box_count, camera, BOX_IMAGE);
        let scene = Scene::build(config, ground, block);
        gfx::add_banner(
            &mut renderer,
            font_sheet,
            TITLE,
            BANNER_HEIGHT,
            BANNER_TOP,
            camera,
        );
        log::info!(
            "{} platforms, {} boxes; press P to pause",
            scene.grounds().len(),
            scene.boxes().len()
        );
        Self {
            scene,
            textures: [ground, block],
            input: Input::default(),
            clock: Clock::new(1.0 / 60.0, 0.0002, 5),
            last_frame: Instant::now(),
            renderer,
            window,
        }
    }

    fn handle(&mut self, event: &Event<()>, target: &EventLoopWindowTarget<()>) {
        match self.renderer.handle_event(
            &mut self.clock,
            &self.window,
            event,
            target,
            &mut self.input,
        ) {
            // one physics step per drawn frame, whatever the clock thinks
            EventPhase::Run(_steps) => self.frame(),
            EventPhase::Quit => target.exit(),
            EventPhase::Wait => {}
        }
    }

    fn frame(&mut self) {
        let dt = self.last_frame.elapsed().as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = Instant::now();
        if self.input.is_key_pressed(PAUSE_KEY) {
            self.toggle_pause();
        }
        self.scene.advance(dt);
        gfx::draw_scene(&mut self.renderer, &self.scene, &self.textures);
        self.renderer.render();
        self.input.next_frame();
    }

    fn toggle_pause(&mut self) {
        if self.scene.toggle_pause() {
            self.window.set_title(&format!("{TITLE} (paused)"));
            log::info!("paused");
            for (i, b) in self.scene.boxes().iter().enumerate() {
                let pose = b.draw_pose(self.scene.world());
                log::debug!("box {i}: corner {:?}, {:.1} degrees", pose.corner, pose.degrees());
            }
        } else {
            self.window.set_title(TITLE);
            log::info!("resumed");
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SceneConfig::default();
    let ground_img = assets::load_rgba(GROUND_IMAGE)?;
    let box_img = assets::load_rgba(BOX_IMAGE)?;
    let font_sheet = assets::font_sheet()?;
    let size = (config.width as u32, config.height as u32);
    let builder = winit::window::WindowBuilder::new()
        .with_title(TITLE)
        .with_inner_size(winit::dpi::PhysicalSize::new(size.0, size.1));
    let drv = frenderer::Driver::new(builder, Some(size));
    drv.run_event_loop::<(), _>(
        move |window, renderer| {
            Demo::new(window, renderer, config, &ground_img, &box_img, &font_sheet)
        },
        move |event, target, demo| demo.handle(&event, target),
    )?;
    Ok(())
}
