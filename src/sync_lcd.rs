
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use ufmt_write::uWrite;

use crate::{
    escape_token, Backlight, BitMode, CharacterSize, Commands, DisplayControl, DisplayShift, Error,
    Lines, Mode, TextDirection, ENABLE, ROW_OFFSETS,
};

/// API to write to the LCD.
pub struct Lcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    i2c: &'a mut I,
    delay: &'a mut D,
    address: u8,
    cols: u8,
    rows: u8,
    character_size: CharacterSize,
    display_function: u8,
    display_control: u8,
    display_mode: u8,
    backlight: Backlight,
}

impl<'a, I, D> Lcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    /// Create new instance with only the I2C and delay instance. Geometry
    /// defaults to the common 20x4 module at address `0x27`.
    pub fn new(i2c: &'a mut I, delay: &'a mut D) -> Self {
        Self {
            i2c,
            delay,
            address: 0x27,
            cols: 20,
            rows: 4,
            character_size: CharacterSize::Dots5x8,
            display_function: 0,
            display_control: 0,
            display_mode: 0,
            backlight: Backlight::On,
        }
    }

    /// Set I2C address, see [lcd address].
    ///
    /// [lcd address]: https://www.ardumotive.com/i2clcden.html
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Number of columns.
    pub fn with_cols(mut self, cols: u8) -> Self {
        self.cols = cols;
        self
    }

    /// Number of rows.
    pub fn with_rows(mut self, rows: u8) -> Self {
        self.rows = rows;
        self
    }

    /// Font size, only honored on single-row displays.
    pub fn with_character_size(mut self, character_size: CharacterSize) -> Self {
        self.character_size = character_size;
        self
    }

    pub fn with_backlight(mut self, backlight: Backlight) -> Self {
        self.backlight = backlight;
        self
    }

    /// Initializes the hardware.
    ///
    /// Runs the power-on sequence from the HD44780 datasheet: three 8 bit
    /// resets bring the controller into a known state from any bus history,
    /// then one raw nibble switches it to 4 bit operation and the usual
    /// function set / display control / entry mode setup follows. A bus error
    /// at any step aborts construction, the display is then unusable until a
    /// fresh `init()` succeeds.
    pub fn init(mut self) -> Result<Self, Error<I::Error>> {
        self.display_function = if self.rows > 1 {
            BitMode::Bit4 as u8 | Lines::Two as u8
        } else if self.character_size == CharacterSize::Dots5x10 {
            Lines::One as u8 | CharacterSize::Dots5x10 as u8
        } else {
            Lines::One as u8 | CharacterSize::Dots5x8 as u8
        };

        // Initial delay to wait for init after power on.
        self.delay.delay_ms(50);

        // Init with 8 bit mode
        let mode_8bit = Mode::FunctionSet as u8 | BitMode::Bit8 as u8;
        self.write4bits(mode_8bit)?;
        self.delay.delay_ms(5);
        self.write4bits(mode_8bit)?;
        self.delay.delay_ms(5);
        self.write4bits(mode_8bit)?;
        self.delay.delay_us(150);

        // Switch to 4 bit mode
        self.write4bits(Mode::FunctionSet as u8 | BitMode::Bit4 as u8)?;

        self.command(Mode::FunctionSet as u8 | self.display_function)?;

        // Display on, no cursor, no blinking
        self.update_display_control(DisplayControl::Display as u8)?;
        self.clear()?;

        // Text flows left to right, no autoscroll
        self.update_display_mode(
            TextDirection::LeftToRight as u8 | DisplayShift::Decrement as u8,
        )?;
        self.return_home()?;
        Ok(self)
    }

    /// Single byte to the expander, with the backlight bit riding along.
    fn expander_write(&mut self, byte: u8) -> Result<(), Error<I::Error>> {
        self.i2c
            .write(self.address, &[byte | self.backlight as u8])
            .map_err(Error::Bus)?;
        self.delay.delay_us(100);
        Ok(())
    }

    /// Latch one nibble: write it, pulse enable, drop enable again. The
    /// delays are lower bounds from the controller timing, shortening them
    /// breaks on real hardware.
    fn write4bits(&mut self, data: u8) -> Result<(), Error<I::Error>> {
        self.expander_write(data)?;
        self.expander_write(data | ENABLE)?;
        self.delay.delay_us(500); // enable pulse width
        self.expander_write(data & !ENABLE)?;
        self.delay.delay_us(100); // data hold time
        Ok(())
    }

    fn send(&mut self, data: u8, mode: Mode) -> Result<(), Error<I::Error>> {
        let high_bits: u8 = data & 0xf0;
        let low_bits: u8 = (data << 4) & 0xf0;
        self.write4bits(high_bits | mode as u8)?;
        self.write4bits(low_bits | mode as u8)?;
        Ok(())
    }

    fn command(&mut self, data: u8) -> Result<(), Error<I::Error>> {
        self.send(data, Mode::Cmd)
    }

    /// Store a freshly computed control mask and resend the whole register,
    /// the controller has no partial update for it.
    fn update_display_control(&mut self, control: u8) -> Result<(), Error<I::Error>> {
        self.display_control = control;
        self.command(Mode::DisplayControl as u8 | control)
    }

    /// Same discipline for the entry mode register.
    fn update_display_mode(&mut self, mode: u8) -> Result<(), Error<I::Error>> {
        self.display_mode = mode;
        self.command(Mode::EntrySet as u8 | mode)
    }

    /// Clear the display
    pub fn clear(&mut self) -> Result<(), Error<I::Error>> {
        self.command(Commands::Clear as u8)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Return cursor to upper left corner, i.e. (0,0).
    pub fn return_home(&mut self) -> Result<(), Error<I::Error>> {
        self.command(Commands::ReturnHome as u8)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Move the cursor to (col, row), zero based. Out of range coordinates
    /// are clamped to the last column/row, not rejected.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Error<I::Error>> {
        let row = row
            .min(self.rows.saturating_sub(1))
            .min(ROW_OFFSETS.len() as u8 - 1);
        let col = col.min(self.cols.saturating_sub(1));
        self.command(Mode::DDRAMAddr as u8 | (col + ROW_OFFSETS[row as usize]))
    }

    /// Turn the display on.
    pub fn display_on(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_control(self.display_control | DisplayControl::Display as u8)
    }

    /// Turn the display off.
    pub fn display_off(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_control(self.display_control & !(DisplayControl::Display as u8))
    }

    /// Show the cursor.
    pub fn cursor_on(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_control(self.display_control | DisplayControl::Cursor as u8)
    }

    /// Hide the cursor.
    pub fn cursor_off(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_control(self.display_control & !(DisplayControl::Cursor as u8))
    }

    /// Blink the cursor position.
    pub fn blink_on(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_control(self.display_control | DisplayControl::Blink as u8)
    }

    /// Stop blinking the cursor position.
    pub fn blink_off(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_control(self.display_control & !(DisplayControl::Blink as u8))
    }

    /// Shift the whole display one position to the left.
    pub fn scroll_display_left(&mut self) -> Result<(), Error<I::Error>> {
        self.command(Commands::ShiftDisplayLeft as u8)
    }

    /// Shift the whole display one position to the right.
    pub fn scroll_display_right(&mut self) -> Result<(), Error<I::Error>> {
        self.command(Commands::ShiftDisplayRight as u8)
    }

    /// Text flows left to right.
    pub fn left_to_right(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_mode(self.display_mode | TextDirection::LeftToRight as u8)
    }

    /// Text flows right to left.
    pub fn right_to_left(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_mode(self.display_mode & !(TextDirection::LeftToRight as u8))
    }

    /// Shift the display on every written character.
    pub fn autoscroll_on(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_mode(self.display_mode | DisplayShift::Increment as u8)
    }

    /// Keep the display still while writing.
    pub fn autoscroll_off(&mut self) -> Result<(), Error<I::Error>> {
        self.update_display_mode(self.display_mode & !(DisplayShift::Increment as u8))
    }

    /// Switch the backlight. The state also rides along with every following
    /// expander write.
    pub fn backlight(&mut self, backlight: Backlight) -> Result<(), Error<I::Error>> {
        self.backlight = backlight;
        self.expander_write(0)
    }

    /// Upload a glyph to one of the 8 CGRAM slots. `pattern` holds up to 8
    /// rows of 5 bits each, shorter patterns are padded with blank rows. The
    /// glyph is printed by writing its slot index as a character code, e.g.
    /// with [`Lcd::write_byte`] or a `{0x00}` escape.
    pub fn create_char(&mut self, slot: u8, pattern: &[u8]) -> Result<(), Error<I::Error>> {
        if slot > 7 {
            return Err(Error::InvalidSlot);
        }
        if pattern.len() > 8 {
            return Err(Error::InvalidPatternLength);
        }
        if pattern.iter().any(|&row| row > 0x1f) {
            return Err(Error::InvalidPatternValue);
        }
        self.command(Mode::CGRAMAddr as u8 | (slot << 3))?;
        for i in 0..8 {
            self.write_byte(pattern.get(i).copied().unwrap_or(0))?;
        }
        Ok(())
    }

    /// Write a raw byte as character data at the cursor position.
    pub fn write_byte(&mut self, data: u8) -> Result<(), Error<I::Error>> {
        self.send(data, Mode::Data)
    }

    /// Write string to display.
    pub fn write_str(&mut self, data: &str) -> Result<(), Error<I::Error>> {
        for c in data.chars() {
            self.write_byte(c as u8)?;
        }
        Ok(())
    }

    /// Write a string, substituting `{0xHH}` tokens with the literal byte
    /// value. Sequences that do not match the token exactly fall through
    /// character by character.
    pub fn write_str_escaped(&mut self, data: &str) -> Result<(), Error<I::Error>> {
        let mut rest = data;
        loop {
            if let Some(value) = escape_token(rest) {
                self.write_byte(value)?;
                rest = &rest[6..];
            } else if let Some(c) = rest.chars().next() {
                self.write_byte(c as u8)?;
                rest = &rest[c.len_utf8()..];
            } else {
                return Ok(());
            }
        }
    }

    /// Write a full line, truncated and padded with spaces to the display
    /// width so that leftovers from an earlier, longer write are gone. With
    /// `centered` the text is indented by half the free width.
    pub fn write_line(
        &mut self,
        data: &str,
        line: u8,
        centered: bool,
    ) -> Result<(), Error<I::Error>> {
        self.set_cursor(0, line)?;
        let width = self.cols as usize;
        let mut written = 0;
        if centered {
            let padding = width.saturating_sub(data.chars().count()) / 2;
            while written < padding {
                self.write_byte(b' ')?;
                written += 1;
            }
        }
        for c in data.chars() {
            if written == width {
                break;
            }
            self.write_byte(c as u8)?;
            written += 1;
        }
        while written < width {
            self.write_byte(b' ')?;
            written += 1;
        }
        Ok(())
    }

    /// Overwrite a line with spaces.
    pub fn clear_line(&mut self, line: u8) -> Result<(), Error<I::Error>> {
        self.write_line("", line, false)
    }
}

impl<'a, I, D> uWrite for Lcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    type Error = Error<I::Error>;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use super::*;

    const ADDR: u8 = 0x27;
    const BACKLIGHT: u8 = 0x08;

    /// One nibble on the bus: expander write, enable pulse, enable cleared.
    fn nibble(byte: u8) -> Vec<I2cTransaction> {
        std::vec![
            I2cTransaction::write(ADDR, std::vec![byte | BACKLIGHT]),
            I2cTransaction::write(ADDR, std::vec![byte | ENABLE | BACKLIGHT]),
            I2cTransaction::write(ADDR, std::vec![(byte & !ENABLE) | BACKLIGHT]),
        ]
    }

    /// One framed byte: high nibble then low nibble.
    fn framed(value: u8, mode: u8) -> Vec<I2cTransaction> {
        let mut seq = nibble((value & 0xf0) | mode);
        seq.extend(nibble(((value << 4) & 0xf0) | mode));
        seq
    }

    fn command(value: u8) -> Vec<I2cTransaction> {
        framed(value, 0x00)
    }

    fn data(value: u8) -> Vec<I2cTransaction> {
        framed(value, 0x01)
    }

    /// Power-on sequence with the given function set payload.
    fn init_sequence_for(function_set: u8) -> Vec<I2cTransaction> {
        let mut seq = Vec::new();
        seq.extend(nibble(0x30)); // 8 bit reset
        seq.extend(nibble(0x30));
        seq.extend(nibble(0x30));
        seq.extend(nibble(0x20)); // switch to 4 bit
        seq.extend(command(0x20 | function_set));
        seq.extend(command(0x0c)); // display on, cursor off, blink off
        seq.extend(command(0x01)); // clear
        seq.extend(command(0x06)); // entry mode: left to right, no shift
        seq.extend(command(0x02)); // home
        seq
    }

    /// Power-on sequence for the default 20x4 geometry.
    fn init_sequence() -> Vec<I2cTransaction> {
        init_sequence_for(0x08) // 4 bit, two lines
    }

    fn init_lcd<'a>(i2c: &'a mut I2cMock, delay: &'a mut NoopDelay) -> Lcd<'a, I2cMock, NoopDelay> {
        Lcd::new(i2c, delay)
            .with_address(ADDR)
            .with_cols(20)
            .with_rows(4)
            .init()
            .unwrap()
    }

    #[test]
    fn init_writes_fixed_sequence() {
        let mut i2c = I2cMock::new(&init_sequence());
        let mut delay = NoopDelay::new();
        let lcd = init_lcd(&mut i2c, &mut delay);
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn init_function_set_follows_geometry() {
        // single row, 5x8 font
        let mut i2c = I2cMock::new(&init_sequence_for(0x00));
        let mut delay = NoopDelay::new();
        let lcd = Lcd::new(&mut i2c, &mut delay)
            .with_address(ADDR)
            .with_cols(16)
            .with_rows(1)
            .init()
            .unwrap();
        drop(lcd);
        i2c.done();

        // single row, 5x10 font
        let mut i2c = I2cMock::new(&init_sequence_for(0x04));
        let mut delay = NoopDelay::new();
        let lcd = Lcd::new(&mut i2c, &mut delay)
            .with_address(ADDR)
            .with_cols(16)
            .with_rows(1)
            .with_character_size(CharacterSize::Dots5x10)
            .init()
            .unwrap();
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn set_cursor_uses_row_offsets() {
        let mut expected = init_sequence();
        expected.extend(command(0x80)); // (0, 0)
        expected.extend(command(0xc3)); // (3, 1) -> 0x40 + 3
        expected.extend(command(0x94)); // (0, 2) -> 0x14
        expected.extend(command(0xe7)); // (19, 3) -> 0x54 + 19

        let mut i2c = I2cMock::new(&expected);
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        lcd.set_cursor(0, 0).unwrap();
        lcd.set_cursor(3, 1).unwrap();
        lcd.set_cursor(0, 2).unwrap();
        lcd.set_cursor(19, 3).unwrap();
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn set_cursor_clamps_to_last_column_and_row() {
        let mut expected = init_sequence();
        expected.extend(command(0xe7)); // clamped to (19, 3)

        let mut i2c = I2cMock::new(&expected);
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        lcd.set_cursor(99, 99).unwrap();
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn write_line_pads_to_full_width() {
        let mut expected = init_sequence();
        expected.extend(command(0x80));
        for c in "HELLO".bytes() {
            expected.extend(data(c));
        }
        for _ in 0..15 {
            expected.extend(data(b' '));
        }

        let mut i2c = I2cMock::new(&expected);
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        lcd.write_line("HELLO", 0, false).unwrap();
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn write_line_truncates_long_text() {
        let mut expected = init_sequence();
        expected.extend(command(0xc0));
        for c in "ABCDEFGHIJKLMNOPQRST".bytes() {
            expected.extend(data(c));
        }

        let mut i2c = I2cMock::new(&expected);
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        lcd.write_line("ABCDEFGHIJKLMNOPQRSTUVWX", 1, false).unwrap();
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn write_line_centers_with_floor_division() {
        // 20 columns, 5 characters: 7 spaces, text, 8 trailing spaces
        let mut expected = init_sequence();
        expected.extend(command(0x80));
        for _ in 0..7 {
            expected.extend(data(b' '));
        }
        for c in "HELLO".bytes() {
            expected.extend(data(c));
        }
        for _ in 0..8 {
            expected.extend(data(b' '));
        }

        let mut i2c = I2cMock::new(&expected);
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        lcd.write_line("HELLO", 0, true).unwrap();
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn clear_line_overwrites_with_spaces() {
        let mut expected = init_sequence();
        expected.extend(command(0x94));
        for _ in 0..20 {
            expected.extend(data(b' '));
        }

        let mut i2c = I2cMock::new(&expected);
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        lcd.clear_line(2).unwrap();
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn write_str_escaped_substitutes_tokens() {
        let mut expected = init_sequence();
        expected.extend(data(0x41));
        expected.extend(data(0x41));
        expected.extend(data(0x42));

        let mut i2c = I2cMock::new(&expected);
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        lcd.write_str_escaped("A{0x41}B").unwrap();
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn write_str_escaped_passes_malformed_tokens_through() {
        let mut expected = init_sequence();
        for c in "{0xZZ}".bytes() {
            expected.extend(data(c));
        }

        let mut i2c = I2cMock::new(&expected);
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        lcd.write_str_escaped("{0xZZ}").unwrap();
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn create_char_rejects_invalid_input() {
        let mut i2c = I2cMock::new(&init_sequence());
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        assert_eq!(lcd.create_char(8, &[0]), Err(Error::InvalidSlot));
        assert_eq!(lcd.create_char(0, &[32]), Err(Error::InvalidPatternValue));
        assert_eq!(
            lcd.create_char(0, &[0; 9]),
            Err(Error::InvalidPatternLength)
        );
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn create_char_pads_pattern_and_uploads_in_order() {
        let mut expected = init_sequence();
        expected.extend(command(0x48)); // CGRAM address, slot 1
        for row in [1, 2, 3, 0, 0, 0, 0, 0] {
            expected.extend(data(row));
        }

        let mut i2c = I2cMock::new(&expected);
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        lcd.create_char(1, &[1, 2, 3]).unwrap();
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn display_on_resends_control_register_each_time() {
        let mut expected = init_sequence();
        expected.extend(command(0x0c));
        expected.extend(command(0x0c));

        let mut i2c = I2cMock::new(&expected);
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        lcd.display_on().unwrap();
        lcd.display_on().unwrap();
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn control_toggles_accumulate_in_mask() {
        let mut expected = init_sequence();
        expected.extend(command(0x0e)); // cursor on
        expected.extend(command(0x0f)); // blink on
        expected.extend(command(0x0b)); // display off
        expected.extend(command(0x0a)); // blink off

        let mut i2c = I2cMock::new(&expected);
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        lcd.cursor_on().unwrap();
        lcd.blink_on().unwrap();
        lcd.display_off().unwrap();
        lcd.blink_off().unwrap();
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn entry_mode_toggles_resend_mode_register() {
        let mut expected = init_sequence();
        expected.extend(command(0x07)); // autoscroll on
        expected.extend(command(0x05)); // right to left
        expected.extend(command(0x04)); // autoscroll off
        expected.extend(command(0x06)); // left to right

        let mut i2c = I2cMock::new(&expected);
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        lcd.autoscroll_on().unwrap();
        lcd.right_to_left().unwrap();
        lcd.autoscroll_off().unwrap();
        lcd.left_to_right().unwrap();
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn scroll_commands_are_one_shot() {
        let mut expected = init_sequence();
        expected.extend(command(0x18));
        expected.extend(command(0x1c));

        let mut i2c = I2cMock::new(&expected);
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        lcd.scroll_display_left().unwrap();
        lcd.scroll_display_right().unwrap();
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn backlight_bit_rides_on_every_write() {
        let mut expected = init_sequence();
        expected.push(I2cTransaction::write(ADDR, std::vec![0x00]));
        // 'A' with the backlight bit gone from every byte
        for byte in [0x41, 0x45, 0x41, 0x11, 0x15, 0x11] {
            expected.push(I2cTransaction::write(ADDR, std::vec![byte]));
        }
        expected.push(I2cTransaction::write(ADDR, std::vec![0x08]));

        let mut i2c = I2cMock::new(&expected);
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        lcd.backlight(Backlight::Off).unwrap();
        lcd.write_byte(b'A').unwrap();
        lcd.backlight(Backlight::On).unwrap();
        drop(lcd);
        i2c.done();
    }

    #[test]
    fn bus_errors_propagate() {
        use embedded_hal::i2c::ErrorKind;

        let mut expected = init_sequence();
        expected.push(
            I2cTransaction::write(ADDR, std::vec![0x80 | BACKLIGHT])
                .with_error(ErrorKind::Other),
        );

        let mut i2c = I2cMock::new(&expected);
        let mut delay = NoopDelay::new();
        let mut lcd = init_lcd(&mut i2c, &mut delay);
        assert_eq!(lcd.set_cursor(0, 0), Err(Error::Bus(ErrorKind::Other)));
        drop(lcd);
        i2c.done();
    }
}
