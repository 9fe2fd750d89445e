use pngico::{Blob, ErrorKind};

//===========================================================================//

#[test]
fn decode_round_trip() {
    let images = vec![
        make_png(16, 16, png::ColorType::Rgba),
        make_png(32, 32, png::ColorType::Rgb),
        make_png(256, 256, png::ColorType::GrayscaleAlpha),
        make_png(7, 200, png::ColorType::Grayscale),
    ];
    let ico = pngico::encode(&images, true).unwrap();
    let decoded = pngico::decode(&ico).unwrap();
    assert_eq!(decoded.len(), images.len());
    let expected_bpp = [32, 24, 16, 8];
    for (index, (image, original)) in
        decoded.iter().zip(images.iter()).enumerate()
    {
        let header = pngico::PngHeader::parse(original).unwrap();
        assert_eq!(image.data(), original.as_slice(), "image {}", index);
        assert_eq!(image.width(), header.width());
        assert_eq!(image.height(), header.height());
        assert_eq!(image.bits_per_pixel(), expected_bpp[index]);
    }
}

#[test]
fn decode_256_uses_png_header() {
    let ico =
        pngico::encode(&[make_png(256, 256, png::ColorType::Rgba)], true)
            .unwrap();
    assert_eq!(&ico[6..8], b"\x00\x00");
    let decoded = pngico::decode(&ico).unwrap();
    assert_eq!(decoded[0].width(), 256);
    assert_eq!(decoded[0].height(), 256);
}

#[test]
fn decode_ignores_directory_dimensions() {
    let mut ico =
        pngico::encode(&[make_png(10, 20, png::ColorType::Rgb)], true)
            .unwrap();
    ico[6] = 99;
    ico[7] = 1;
    let decoded = pngico::decode(&ico).unwrap();
    assert_eq!(decoded[0].width(), 10);
    assert_eq!(decoded[0].height(), 20);
}

#[test]
fn decode_blob_source() {
    let ico = pngico::encode(&[make_png(4, 4, png::ColorType::Rgba)], true)
        .unwrap();
    let blob = Blob::icon(ico);
    let decoded = pngico::decode_source(&blob).unwrap();
    let png = decoded.into_iter().next().unwrap().into_blob();
    assert_eq!(png.mime(), "image/png");
    assert!(pngico::PngHeader::is_png(png.data()));
}

#[test]
fn decode_rejects_zero_signature() {
    let mut ico = pngico::encode(&[make_png(4, 4, png::ColorType::Rgba)], true)
        .unwrap();
    ico[2] = 0;
    let error = pngico::decode(&ico).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidFormat);
}

#[test]
fn decode_rejects_truncated_file() {
    let ico = pngico::encode(
        &[
            make_png(4, 4, png::ColorType::Rgba),
            make_png(8, 8, png::ColorType::Rgba),
        ],
        true,
    )
    .unwrap();
    for &len in &[3, 6, 21, 37, ico.len() - 1] {
        let error = pngico::decode(&ico[..len]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidFormat, "length {}", len);
    }
}

#[test]
fn decode_rejects_corrupt_payload() {
    let first = make_png(4, 4, png::ColorType::Rgba);
    let mut ico = pngico::encode(
        &[first.clone(), make_png(8, 8, png::ColorType::Rgba)],
        true,
    )
    .unwrap();
    // Damage the IHDR tag of the second image.
    let second_start = 38 + first.len();
    ico[second_start + 12] = b'X';
    let error = pngico::decode(&ico).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidFormat);
}

//===========================================================================//

fn make_png(width: u32, height: u32, color_type: png::ColorType) -> Vec<u8> {
    let samples = color_type.samples();
    let pixels = vec![0x7f; (width * height) as usize * samples];
    let mut data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut data, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&pixels).unwrap();
        writer.finish().unwrap();
    }
    data
}

//===========================================================================//
