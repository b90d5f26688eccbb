use image::ImageFormat;
use rand::RngCore;
use rtti_extract::bitmap::{checked_file_size, encode_bitmap, file_size, row_padding};
use rtti_extract::constants::BMP_HEADER_SIZE;
use rtti_extract::record::Dimensions;

fn random_pixels(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; width * height * 3];
    rand::rng().fill_bytes(&mut pixels);
    pixels
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// 2x1 图像：通道交换后补 2 字节填充，总长 62
#[test]
fn test_two_by_one_image() {
    let bmp = encode_bitmap(vec![10, 20, 30, 40, 50, 60], Dimensions::new(2, 1));

    assert_eq!(bmp.len(), 62);
    assert_eq!(&bmp[BMP_HEADER_SIZE..], &[30, 20, 10, 60, 50, 40, 0, 0]);
}

/// 逐字节检查两个头部
#[test]
fn test_headers() {
    let bmp = encode_bitmap(vec![0; 5 * 3 * 3], Dimensions::new(5, 3));
    let size = file_size(Dimensions::new(5, 3));

    // 文件头
    assert_eq!(&bmp[0..2], b"BM");
    assert_eq!(le_u32(&bmp, 2) as usize, size);
    assert_eq!(le_u32(&bmp, 6), 0);
    assert_eq!(le_u32(&bmp, 10), 54);

    // 信息头
    assert_eq!(le_u32(&bmp, 14), 40);
    assert_eq!(le_u32(&bmp, 18), 5);
    assert_eq!(le_u32(&bmp, 22), 3);
    assert_eq!(u16::from_le_bytes([bmp[26], bmp[27]]), 1);
    assert_eq!(u16::from_le_bytes([bmp[28], bmp[29]]), 24);
    assert!(bmp[30..54].iter().all(|&b| b == 0));
}

/// 每行长度加填充是 4 的倍数，且大小字段等于实际长度
#[test]
fn test_padding_and_size_for_all_widths() {
    for width in 1..=9 {
        for height in 1..=3 {
            let padding = row_padding(width);
            assert!(padding < 4);
            assert_eq!((width * 3 + padding) % 4, 0, "width {}", width);

            let dims = Dimensions::new(width as i32, height as i32);
            let bmp = encode_bitmap(random_pixels(width, height), dims);
            assert_eq!(bmp.len(), file_size(dims));
            assert_eq!(le_u32(&bmp, 2) as usize, bmp.len());
        }
    }
}

/// 行顺序自下而上：输出的第一行是源图像的最后一行
#[test]
fn test_rows_are_bottom_up() {
    // 1x3 图像，每行一个像素
    let pixels = vec![1, 2, 3, 4, 5, 6, 7, 8, 9];
    let bmp = encode_bitmap(pixels, Dimensions::new(1, 3));

    // 每行 3 字节像素 + 1 字节填充
    assert_eq!(
        &bmp[BMP_HEADER_SIZE..],
        &[9, 8, 7, 0, 6, 5, 4, 0, 3, 2, 1, 0]
    );
}

/// 用 image crate 独立解码，结果应与原始像素完全一致
#[test]
fn test_decodes_back_to_original_pixels() -> anyhow::Result<()> {
    let (width, height) = (13, 7);
    let pixels = random_pixels(width, height);

    let bmp = encode_bitmap(pixels.clone(), Dimensions::new(width as i32, height as i32));
    let decoded = image::load_from_memory_with_format(&bmp, ImageFormat::Bmp)?.to_rgb8();

    assert_eq!(decoded.dimensions(), (width as u32, height as u32));
    assert_eq!(decoded.into_raw(), pixels);
    Ok(())
}

/// 带检查的大小计算与 file_size 一致，超出 u32 时返回 None
#[test]
fn test_checked_file_size() {
    let dims = Dimensions::new(5, 3);
    assert_eq!(checked_file_size(dims), Some(file_size(dims) as u32));

    assert_eq!(checked_file_size(Dimensions::new(40000, 36000)), None);
    assert_eq!(checked_file_size(Dimensions::new(i32::MAX, i32::MAX)), None);
    assert_eq!(checked_file_size(Dimensions::new(-1, 1)), None);
}
