use boxpile::{DrawPose, Scene, TextureId, TextureInfo, Vec2};
use bytemuck::Zeroable;
use frenderer::bitfont::BitFont;
use frenderer::sprites::{Camera2D, SheetRegion, Transform};
use frenderer::{wgpu, Renderer};

const GLYPH_W: u16 = 16;
const GLYPH_H: u16 = 32;

fn upload(renderer: &Renderer, img: &image::RgbaImage, label: &str) -> wgpu::Texture {
    let pixels: &[u8] = img.as_raw();
    renderer.create_array_texture(
        &[pixels],
        wgpu::TextureFormat::Rgba8UnormSrgb,
        img.dimensions(),
        Some(label),
    )
}

/// Uploads `img` and makes a sprite group with room for `count` copies of it.
/// The group index doubles as the scene's [`TextureId`].
pub fn add_texture(
    renderer: &mut Renderer,
    img: &image::RgbaImage,
    count: usize,
    camera: Camera2D,
    label: &str,
) -> TextureInfo {
    let (width, height) = img.dimensions();
    let tex = upload(renderer, img, label);
    let group = renderer.sprite_group_add(
        &tex,
        vec![Transform::zeroed(); count],
        vec![whole_texture(width, height); count],
        camera,
    );
    TextureInfo {
        id: TextureId(group),
        width,
        height,
    }
}

fn whole_texture(width: u32, height: u32) -> SheetRegion {
    SheetRegion::new(0, 0, 0, 0, width as _, height as _)
}

/// Printable ASCII laid out in fixed cells across the whole sheet.
pub fn banner_font(sheet_width: u32, sheet_height: u32) -> BitFont {
    BitFont::with_sheet_region(
        ' '..='~',
        whole_texture(sheet_width, sheet_height),
        GLYPH_W,
        GLYPH_H,
        0,
        0,
    )
}

// BitFont steps an extra cell past whitespace
fn text_width(text: &str, char_height: f32) -> f32 {
    let cells = text.chars().count() + text.chars().filter(|c| c.is_whitespace()).count();
    cells as f32 * char_height * GLYPH_W as f32 / GLYPH_H as f32
}

/// One line of `text`, centered horizontally with its top `top` pixels below the top of the camera.
pub fn layout_banner(
    font: &BitFont,
    text: &str,
    char_height: f32,
    top: f32,
    camera: Camera2D,
) -> (Vec<Transform>, Vec<SheetRegion>) {
    let mut trfs = vec![Transform::ZERO; text.len()];
    let mut uvs = vec![SheetRegion::ZERO; text.len()];
    let left = camera.screen_pos[0] + (camera.screen_size[0] - text_width(text, char_height)) / 2.0;
    let y = camera.screen_pos[1] + camera.screen_size[1] - top;
    font.draw_text(&mut trfs, &mut uvs, text, [left, y], 0, char_height);
    (trfs, uvs)
}

/// Gives the banner its own sprite group.  It never moves, so it's laid out once here.
pub fn add_banner(
    renderer: &mut Renderer,
    sheet: &image::RgbaImage,
    text: &str,
    char_height: f32,
    top: f32,
    camera: Camera2D,
) -> usize {
    let tex = upload(renderer, sheet, "font");
    let font = banner_font(sheet.width(), sheet.height());
    let (trfs, uvs) = layout_banner(&font, text, char_height, top, camera);
    renderer.sprite_group_add(&tex, trfs, uvs, camera)
}

/// The world is y-down with textures hung from their top-left corner;
/// frenderer draws sprites y-up around their center.
pub fn sprite_transform(pose: DrawPose, extent: Vec2, screen_height: f32) -> Transform {
    let center = pose.corner + Vec2::from_angle(pose.angle).rotate(extent);
    Transform {
        x: center.x,
        y: screen_height - center.y,
        w: (2.0 * extent.x) as u16,
        h: (2.0 * extent.y) as u16,
        rot: -pose.angle,
    }
}

pub fn draw_scene(renderer: &mut Renderer, scene: &Scene, textures: &[TextureInfo]) {
    let screen_height = scene.config().height;
    for tex in textures {
        let (trfs, _uvs) = renderer.sprites_mut(tex.id.0, ..);
        for (trf, entity) in trfs.iter_mut().zip(scene.entities_with(tex.id)) {
            *trf = sprite_transform(entity.draw_pose(scene.world()), entity.extent, screen_height);
        }
    }
}
